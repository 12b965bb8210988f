//! Status enumerations for projects and phases.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of project statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Project has been synthesized and is being prepared
    #[default]
    Planning,

    /// The exchange is under way
    InProgress,

    /// The exchange and its reporting are finished
    Completed,
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(ProjectStatus::Planning),
            "in_progress" | "inprogress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            _ => Err(format!("Invalid project status: {s}")),
        }
    }
}

impl ProjectStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
        }
    }
}

/// Type-safe enumeration of phase statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    /// Phase has not been started
    #[default]
    NotStarted,

    /// Phase is being worked on
    InProgress,

    /// Phase has been completed
    Completed,

    /// Phase was skipped (only allowed for skippable phases)
    Skipped,
}

impl FromStr for PhaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" | "notstarted" => Ok(PhaseStatus::NotStarted),
            "in_progress" | "inprogress" => Ok(PhaseStatus::InProgress),
            "completed" => Ok(PhaseStatus::Completed),
            "skipped" => Ok(PhaseStatus::Skipped),
            _ => Err(format!("Invalid phase status: {s}")),
        }
    }
}

impl PhaseStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => "not_started",
            PhaseStatus::InProgress => "in_progress",
            PhaseStatus::Completed => "completed",
            PhaseStatus::Skipped => "skipped",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use waypoint_core::models::PhaseStatus;
    ///
    /// assert_eq!(PhaseStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(PhaseStatus::NotStarted.with_icon(), "○ Not started");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => "○ Not started",
            PhaseStatus::InProgress => "➤ In progress",
            PhaseStatus::Completed => "✓ Completed",
            PhaseStatus::Skipped => "– Skipped",
        }
    }
}
