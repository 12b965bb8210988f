//! Parameter structures for Waypoint operations.
//!
//! These are shared by every interface layer without framework-specific
//! derives. The CLI builds them from its clap arguments via `From`.

use serde::{Deserialize, Serialize};

/// Generic ID parameter for seed and project operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id {
    pub id: u64,
}

/// Parameters for creating a new seed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateSeed {
    pub title: String,
    pub description: Option<String>,
    pub estimated_participants: Option<u32>,
    pub estimated_duration_days: Option<u32>,
}

/// One answer to the question a session is currently asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswer {
    pub seed_id: u64,

    /// Session the caller believes is active; checked when given
    pub session_id: Option<String>,

    pub answer: String,
}

/// Filter for listing projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListProjects {
    pub seed_id: Option<u64>,
}
