//! Error types for experiment records.

use thiserror::Error;

/// Errors raised while loading or validating an experiment record.
#[derive(Error, Debug)]
pub enum RecordError {
    /// A field violates the record invariants.
    #[error("invalid input: {field} {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// The record could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading a record file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecordError {
    /// Name of the offending field, if the error is a field violation.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RecordError::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;
