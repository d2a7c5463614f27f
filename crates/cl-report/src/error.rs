//! Error types for report generation.

use cl_chart::RenderError;
use cl_common::RecordError;
use cl_workbook::WorkbookError;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// No experiment record was supplied.
    #[error("missing input: no experiment record supplied")]
    MissingInput,

    /// The record failed validation.
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A required collaborator is absent or unavailable.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(String),

    /// A chart failed to render or timed out.
    #[error("render failure: {0}")]
    Render(#[from] RenderError),

    /// The workbook could not be built or serialized.
    #[error("serialization failure: {0}")]
    Serialization(#[from] WorkbookError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Stable numeric code for scripting.
    pub fn code(&self) -> u16 {
        match self {
            ReportError::MissingInput => 10,
            ReportError::InvalidInput { .. } => 11,
            ReportError::MissingCollaborator(_) => 12,
            ReportError::InvalidConfig(_) => 13,
            ReportError::Render(RenderError::Timeout { .. }) => 21,
            ReportError::Render(_) => 20,
            ReportError::Serialization(_) => 30,
            ReportError::Json(_) => 40,
            ReportError::Io(_) => 41,
        }
    }

    /// True for errors raised before any metric is computed.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ReportError::MissingInput
                | ReportError::InvalidInput { .. }
                | ReportError::MissingCollaborator(_)
                | ReportError::InvalidConfig(_)
        )
    }
}

impl From<RecordError> for ReportError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidField { field, reason } => {
                ReportError::InvalidInput { field, reason }
            }
            RecordError::Json(e) => ReportError::Json(e),
            RecordError::Io(e) => ReportError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_chart::ChartId;

    #[test]
    fn test_record_error_maps_to_invalid_input() {
        let err: ReportError = RecordError::InvalidField {
            field: "m2",
            reason: "must be greater than zero".into(),
        }
        .into();
        assert_eq!(err.to_string(), "invalid input: m2 must be greater than zero");
        assert_eq!(err.code(), 11);
        assert!(err.is_precondition());
    }

    #[test]
    fn test_timeout_has_own_code() {
        let err: ReportError = RenderError::Timeout {
            chart: ChartId::Momentum,
            ceiling_ms: 10,
        }
        .into();
        assert_eq!(err.code(), 21);
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_serialization_wraps_workbook_error() {
        let err: ReportError = WorkbookError::EmptyWorkbook.into();
        assert_eq!(err.code(), 30);
        assert!(err.to_string().starts_with("serialization failure"));
    }
}
