//! Phase templates and their checklist tasks.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{ActivityType, PhaseStatus};

/// Coarse phase category stored with every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseType {
    Application,
    Accommodation,
    Travel,
    Food,
    Activities,
    Insurance,
    Permits,
    Reporting,
    Custom,
}

impl PhaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseType::Application => "application",
            PhaseType::Accommodation => "accommodation",
            PhaseType::Travel => "travel",
            PhaseType::Food => "food",
            PhaseType::Activities => "activities",
            PhaseType::Insurance => "insurance",
            PhaseType::Permits => "permits",
            PhaseType::Reporting => "reporting",
            PhaseType::Custom => "custom",
        }
    }
}

impl FromStr for PhaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "application" => Ok(PhaseType::Application),
            "accommodation" => Ok(PhaseType::Accommodation),
            "travel" => Ok(PhaseType::Travel),
            "food" => Ok(PhaseType::Food),
            "activities" => Ok(PhaseType::Activities),
            "insurance" => Ok(PhaseType::Insurance),
            "permits" => Ok(PhaseType::Permits),
            "reporting" => Ok(PhaseType::Reporting),
            "custom" => Ok(PhaseType::Custom),
            _ => Err(format!("Invalid phase type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelDirection {
    Outbound,
    Return,
}

impl TravelDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelDirection::Outbound => "outbound",
            TravelDirection::Return => "return",
        }
    }
}

/// Permit sub-types; visas are handled as a permit phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermitType {
    Visa,
    Event,
    Venue,
    FoodHandling,
    PublicAssembly,
}

impl PermitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermitType::Visa => "visa",
            PermitType::Event => "event",
            PermitType::Venue => "venue",
            PermitType::FoodHandling => "food_handling",
            PermitType::PublicAssembly => "public_assembly",
        }
    }
}

/// Explicit phase sub-type used for checklist dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseKind {
    Application,
    Accommodation,
    Travel { direction: TravelDirection },
    Food,
    Activity { activity_type: ActivityType },
    Insurance { group: bool },
    Permit { permit: PermitType },
    Reporting,
    Custom { label: String },
}

impl PhaseKind {
    /// The coarse category of this sub-type.
    pub fn phase_type(&self) -> PhaseType {
        match self {
            PhaseKind::Application => PhaseType::Application,
            PhaseKind::Accommodation => PhaseType::Accommodation,
            PhaseKind::Travel { .. } => PhaseType::Travel,
            PhaseKind::Food => PhaseType::Food,
            PhaseKind::Activity { .. } => PhaseType::Activities,
            PhaseKind::Insurance { .. } => PhaseType::Insurance,
            PhaseKind::Permit { .. } => PhaseType::Permits,
            PhaseKind::Reporting => PhaseType::Reporting,
            PhaseKind::Custom { .. } => PhaseType::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Planning,
    Booking,
    Admin,
    Coordination,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Planning => "planning",
            TaskCategory::Booking => "booking",
            TaskCategory::Admin => "admin",
            TaskCategory::Coordination => "coordination",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        }
    }
}

/// A discrete task owned by exactly one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTask {
    /// Unique task identifier (UUID v4)
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub due_date: Option<Date>,
    pub category: TaskCategory,
    pub priority: TaskPriority,
}

/// A scheduled, budgeted unit of a project before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTemplate {
    /// Stable key, unique within a project, used for dependency links
    pub key: String,

    pub name: String,

    pub kind: PhaseKind,

    #[serde(default)]
    pub status: PhaseStatus,

    pub start_date: Date,

    pub end_date: Date,

    pub deadline: Option<Date>,

    /// Allocated budget in whole euros
    pub budget_allocated: u64,

    /// Position in the project, starting at 1
    pub order: u32,

    /// Keys of phases that should finish first (advisory)
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub checklist: Vec<ChecklistTask>,

    pub editable: bool,

    pub skippable: bool,
}

impl PhaseTemplate {
    pub fn phase_type(&self) -> PhaseType {
        self.kind.phase_type()
    }
}
