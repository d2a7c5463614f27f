//! Process exit codes for `cartlab`.
//!
//! - 0: report written
//! - 10-19: problems with what the user supplied
//! - 20-29: failures while producing the report

use cl_report::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Report written.
    Success = 0,

    /// Bad command line arguments.
    ArgsError = 10,
    /// No experiment record in the input.
    MissingInput = 11,
    /// The record failed validation.
    InvalidInput = 12,
    /// The input or config file is not valid JSON.
    MalformedInput = 13,
    /// The report configuration is invalid.
    ConfigError = 14,

    /// A chart engine or workbook serializer is unavailable.
    CollaboratorError = 20,
    /// A chart failed to render.
    RenderError = 21,
    /// A chart did not finish within the render timeout.
    TimeoutError = 22,
    /// The workbook could not be serialized.
    SerializationError = 23,
    /// Reading input or writing the report failed.
    IoError = 24,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Success
    }

    pub fn is_user_error(self) -> bool {
        (10..=19).contains(&self.as_i32())
    }

    pub fn is_internal_error(self) -> bool {
        (20..=29).contains(&self.as_i32())
    }

    /// Short stable name, printed alongside error messages.
    pub fn code_name(self) -> &'static str {
        match self {
            ExitCode::Success => "OK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::MissingInput => "ERR_MISSING_INPUT",
            ExitCode::InvalidInput => "ERR_INVALID_INPUT",
            ExitCode::MalformedInput => "ERR_MALFORMED_INPUT",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::CollaboratorError => "ERR_COLLABORATOR",
            ExitCode::RenderError => "ERR_RENDER",
            ExitCode::TimeoutError => "ERR_TIMEOUT",
            ExitCode::SerializationError => "ERR_SERIALIZATION",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&ReportError> for ExitCode {
    fn from(err: &ReportError) -> Self {
        match err.code() {
            10 => ExitCode::MissingInput,
            11 => ExitCode::InvalidInput,
            12 => ExitCode::CollaboratorError,
            13 => ExitCode::ConfigError,
            21 => ExitCode::TimeoutError,
            20..=29 => ExitCode::RenderError,
            30..=39 => ExitCode::SerializationError,
            40 => ExitCode::MalformedInput,
            _ => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert!(ExitCode::Success.is_success());
        assert!(ExitCode::InvalidInput.is_user_error());
        assert!(!ExitCode::InvalidInput.is_internal_error());
        assert!(ExitCode::TimeoutError.is_internal_error());
        assert!(ExitCode::IoError.is_internal_error());
    }

    #[test]
    fn test_report_errors_map_to_codes() {
        assert_eq!(ExitCode::from(&ReportError::MissingInput), ExitCode::MissingInput);
        let invalid = ReportError::InvalidInput {
            field: "m2",
            reason: "must be greater than zero".into(),
        };
        assert_eq!(ExitCode::from(&invalid).as_i32(), 12);
        assert_eq!(
            ExitCode::from(&ReportError::MissingCollaborator("chart engine".into())),
            ExitCode::CollaboratorError
        );
        assert_eq!(
            ExitCode::from(&ReportError::InvalidConfig("samples".into())),
            ExitCode::ConfigError
        );
        let io = ReportError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(ExitCode::from(&io), ExitCode::IoError);
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::TimeoutError.to_string(), "ERR_TIMEOUT (22)");
    }
}
