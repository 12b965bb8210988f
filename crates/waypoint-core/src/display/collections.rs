//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper renders its items one after another and prints a short
//! notice instead of an empty string when there is nothing to show.

use std::{fmt, ops::Index};

use crate::models::{ProjectSummary, Seed};

/// Newtype wrapper for displaying a list of seeds.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use waypoint_core::{display::Seeds, models::Seed};
///
/// let seed = Seed {
///     id: 1,
///     title: "Green futures".to_string(),
///     description: Some("Youth exchange on climate action".to_string()),
///     estimated_participants: Some(24),
///     estimated_duration_days: Some(7),
///     created_at: Timestamp::now(),
/// };
/// let output = Seeds(vec![seed]).to_string();
/// assert!(output.contains("Green futures"));
///
/// assert_eq!(Seeds(vec![]).to_string(), "No seeds found.\n");
/// ```
pub struct Seeds(pub Vec<Seed>);

impl Seeds {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Seed> {
        self.0.iter()
    }
}

impl Index<usize> for Seeds {
    type Output = Seed;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Seeds {
    type Item = &'a Seed;
    type IntoIter = std::slice::Iter<'a, Seed>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Seeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No seeds found.")
        } else {
            for seed in &self.0 {
                write!(f, "{seed}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying project summaries.
pub struct ProjectSummaries(pub Vec<ProjectSummary>);

impl ProjectSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectSummary> {
        self.0.iter()
    }
}

impl Index<usize> for ProjectSummaries {
    type Output = ProjectSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a ProjectSummaries {
    type Item = &'a ProjectSummary;
    type IntoIter = std::slice::Iter<'a, ProjectSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ProjectSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No projects found.")
        } else {
            for project in &self.0 {
                write!(f, "{project}")?;
            }
            Ok(())
        }
    }
}
