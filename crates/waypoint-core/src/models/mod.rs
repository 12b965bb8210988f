//! Data models for seeds, elaboration and projects.
//!
//! Display implementations live in [`crate::display::models`] so that the
//! data structures stay free of presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::models::{SpecField, SpecificationState};
//!
//! let mut state = SpecificationState::default();
//! assert!(!state.is_answered(SpecField::ParticipantCount));
//!
//! state.participant_count = Some(30);
//! assert!(state.is_answered(SpecField::ParticipantCount));
//! ```

pub mod phase;
pub mod project;
pub mod seed;
pub mod session;
pub mod specification;
pub mod status;

pub use phase::{
    ChecklistTask, PermitType, PhaseKind, PhaseTemplate, PhaseType, TaskCategory, TaskPriority,
    TravelDirection,
};
pub use project::{NewProject, Phase, Project, ProjectMetadata, ProjectSummary};
pub use seed::Seed;
pub use session::{ElaborationSession, Role, TranscriptMessage};
pub use specification::{
    Activity, ActivityType, BudgetBasis, BudgetFigure, DerivedRequirements, Destination,
    SpecField, SpecificationState, VisaRequirement,
};
pub use status::{PhaseStatus, ProjectStatus};
