//! Project and persisted phase models.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{PhaseTemplate, ProjectStatus};
use crate::synthesis::{BudgetAllocation, Requirements, Timeline};

/// Generator outputs kept with the project for display and later edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub timeline: Timeline,
    pub budget: BudgetAllocation,
    pub requirements: Requirements,
}

/// A phase row: a persisted template plus its identity and spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: u64,
    pub project_id: u64,
    #[serde(default)]
    pub budget_spent: u64,
    #[serde(flatten)]
    pub template: PhaseTemplate,
}

/// A synthesized project with its phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project
    pub id: u64,

    /// Seed the project was converted from
    pub seed_id: u64,

    pub name: String,

    pub participant_count: u32,

    /// Total budget in whole euros
    pub total_budget: u64,

    /// First day of the exchange
    pub start_date: Date,

    /// Last day of the exchange
    pub end_date: Date,

    #[serde(default)]
    pub status: ProjectStatus,

    /// Timestamp when the project was created (UTC)
    pub created_at: Timestamp,

    pub metadata: ProjectMetadata,

    /// Phases in order (loaded with the project)
    #[serde(default)]
    pub phases: Vec<Phase>,
}

impl Project {
    /// Budget not assigned to any phase.
    pub fn unassigned_budget(&self) -> u64 {
        let assigned: u64 = self.phases.iter().map(|p| p.template.budget_allocated).sum();
        self.total_budget.saturating_sub(assigned)
    }
}

/// Input for creating a project together with its phases.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub seed_id: u64,
    pub name: String,
    pub participant_count: u32,
    pub total_budget: u64,
    pub start_date: Date,
    pub end_date: Date,
    pub metadata: ProjectMetadata,
    pub phases: Vec<PhaseTemplate>,
}

/// Compact listing entry for projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub seed_id: u64,
    pub name: String,
    pub participant_count: u32,
    pub total_budget: u64,
    pub start_date: Date,
    pub end_date: Date,
    pub status: ProjectStatus,
    pub phase_count: u32,
    pub created_at: Timestamp,
}
