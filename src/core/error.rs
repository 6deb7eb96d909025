//! Error taxonomy for the record store

use thiserror::Error;

/// Errors surfaced by record store operations.
///
/// None of these are retried; the caller decides how to report them.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Missing or blank required input
    #[error("Validation error: {field} {reason}")]
    Validation {
        /// Name of the offending input field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Uniqueness violation on an index
    #[error("Conflict: {index} '{value}' already exists")]
    Conflict {
        /// Name of the unique index (e.g. `students.email`)
        index: &'static str,
        /// The duplicated value
        value: String,
    },

    /// Target identity does not resolve
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Entity kind (`Student`, `Course`, `Enrollment`)
        entity: &'static str,
        /// Identity that was looked up
        id: String,
    },

    /// Storage or connectivity failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result alias used throughout the record store.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Shorthand for a blank required field.
    #[must_use]
    pub fn blank(field: &'static str) -> Self {
        Self::Validation {
            field,
            reason: "is required".to_string(),
        }
    }

    /// Shorthand for a validation failure with a custom reason.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for a missing record.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Stable short name of the error kind, used in log lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Conflict { .. } => "conflict",
            Self::NotFound { .. } => "not-found",
            Self::Backend(_) => "backend",
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Backend(format!("malformed document: {err}"))
    }
}

/// Fails with [`StoreError::Validation`] when `value` is empty or whitespace.
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(StoreError::blank(field))
    } else {
        Ok(())
    }
}
