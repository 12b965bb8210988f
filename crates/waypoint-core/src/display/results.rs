//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{
    models::{Project, Seed},
    synthesis::{BudgetAllocation, Requirements, Timeline},
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use waypoint_core::{display::CreateResult, models::Seed};
///
/// let seed = Seed {
///     id: 7,
///     title: "Street art in Lisbon".to_string(),
///     description: None,
///     estimated_participants: None,
///     estimated_duration_days: None,
///     created_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(seed).to_string();
/// assert!(output.starts_with("Created seed with ID: 7"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Seed> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created seed with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// A freshly converted project together with the generator outputs it was
/// built from.
pub struct ConversionResult {
    pub project: Project,
}

impl ConversionResult {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.project.metadata.timeline
    }

    pub fn budget(&self) -> &BudgetAllocation {
        &self.project.metadata.budget
    }

    pub fn requirements(&self) -> &Requirements {
        &self.project.metadata.requirements
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created project with ID: {}", self.project.id)?;
        writeln!(f)?;
        write!(f, "{}", self.timeline())?;
        write!(f, "{}", self.budget())?;
        write!(f, "{}", self.requirements())?;
        write!(f, "{}", self.project)
    }
}
