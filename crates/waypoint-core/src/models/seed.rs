//! Seed model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A raw project idea before elaboration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    /// Unique identifier for the seed
    pub id: u64,

    /// Short title of the idea
    pub title: String,

    /// Free-text description, used for priority suggestions
    pub description: Option<String>,

    /// Participant estimate given when the seed was created
    pub estimated_participants: Option<u32>,

    /// Duration estimate in days given when the seed was created
    pub estimated_duration_days: Option<u32>,

    /// Timestamp when the seed was created (UTC)
    pub created_at: Timestamp,
}
