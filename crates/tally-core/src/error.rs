//! Error types for the tally library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all tracker operations.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// No task row exists for the given identity
    #[error("Task '{id}' not found")]
    TaskNotFound { id: String },
    /// A different task already owns the identity
    #[error("A task with this description already exists for this project: '{id}'")]
    TaskConflict { id: String },
    /// Time entry not found for the given ID
    #[error("Time entry with ID {id} not found")]
    EntryNotFound { id: u64 },
    /// Project not found for the given ID
    #[error("Project with ID {id} not found")]
    ProjectNotFound { id: u64 },
    /// Project still referenced by time entries
    #[error(
        "Cannot delete project '{name}' which has {entries} time entries. Deactivate it instead."
    )]
    ProjectInUse { name: String, entries: u64 },
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
    /// Calendar arithmetic or parsing errors
    #[error("Date error: {source}")]
    Date {
        #[from]
        source: jiff::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
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
    pub fn with_source(self, source: rusqlite::Error) -> TallyError {
        TallyError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TallyError {
        TallyError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TallyError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// True for errors caused by the caller's input rather than storage.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TallyError::InvalidInput { .. }
                | TallyError::TaskConflict { .. }
                | TallyError::ProjectInUse { .. }
                | TallyError::Date { .. }
        )
    }

    /// True when the addressed record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TallyError::TaskNotFound { .. }
                | TallyError::EntryNotFound { .. }
                | TallyError::ProjectNotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TallyError::database(message).with_source(e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let conflict = TallyError::TaskConflict {
            id: "Client A|Build API".to_string(),
        };
        assert!(conflict.is_user_error());
        assert!(!conflict.is_not_found());

        let missing = TallyError::TaskNotFound {
            id: "Client A|Build API".to_string(),
        };
        assert!(missing.is_not_found());
        assert!(!missing.is_user_error());
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = TallyError::invalid_input("hours").with_reason("must not be negative");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'hours': must not be negative"
        );
    }
}
