//! Error types for the planner library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Seed not found for the given ID
    #[error("Seed with ID {id} not found")]
    SeedNotFound { id: u64 },
    /// Project not found for the given ID
    #[error("Project with ID {id} not found")]
    ProjectNotFound { id: u64 },
    /// An answer was submitted for a seed that has no elaboration session
    #[error("Seed {seed_id} has no elaboration session; start one first")]
    NoSession { seed_id: u64 },
    /// An answer was submitted against a session that is not the tracked one
    #[error("Session '{given}' does not match the active session '{active}'; restart the session")]
    SessionMismatch { active: String, given: String },
    /// Synthesis was requested for a specification with unmet required fields
    #[error("Specification is incomplete, missing: {}", missing.join(", "))]
    IncompleteSpecification { missing: Vec<String> },
    /// Project synthesis failed as a whole; nothing was persisted
    #[error("Project synthesis failed: {message}")]
    Synthesis { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Calendar arithmetic errors
    #[error("Date error: {source}")]
    Date {
        #[from]
        source: jiff::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a join failure from a blocking task.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_specification_lists_fields() {
        let err = PlannerError::IncompleteSpecification {
            missing: vec!["duration".to_string(), "destination".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Specification is incomplete, missing: duration, destination"
        );
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to load seed").unwrap_err();
        assert!(matches!(err, PlannerError::Database { .. }));
        assert!(err.to_string().contains("Failed to load seed"));
    }
}
