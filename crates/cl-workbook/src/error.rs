//! Error types for workbook construction and serialization.

use thiserror::Error;

/// Errors that can occur while building or writing a workbook.
#[derive(Error, Debug)]
pub enum WorkbookError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Sheet name rejected by spreadsheet naming rules
    #[error("invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },

    /// Two sheets share a name
    #[error("duplicate sheet name: {0}")]
    DuplicateSheetName(String),

    /// Merged ranges may not overlap
    #[error("sheet '{sheet}': merged range {range} overlaps {existing}")]
    OverlappingMerge {
        sheet: String,
        range: String,
        existing: String,
    },

    /// Spreadsheet cells cannot hold NaN or infinity
    #[error("sheet '{sheet}': cell {cell} holds a non-finite number")]
    NonFiniteNumber { sheet: String, cell: String },

    /// Embedded image is not usable
    #[error("sheet '{sheet}': invalid image: {reason}")]
    InvalidImage { sheet: String, reason: String },

    /// Workbook has no sheets
    #[error("workbook has no sheets to write")]
    EmptyWorkbook,

    /// Background serialization task failed
    #[error("serialization task failed: {0}")]
    Task(String),
}

impl WorkbookError {
    /// Name of the sheet at fault, if the error concerns one.
    pub fn sheet(&self) -> Option<&str> {
        match self {
            WorkbookError::OverlappingMerge { sheet, .. }
            | WorkbookError::NonFiniteNumber { sheet, .. }
            | WorkbookError::InvalidImage { sheet, .. } => Some(sheet),
            WorkbookError::InvalidSheetName { name, .. } => Some(name),
            WorkbookError::DuplicateSheetName(name) => Some(name),
            _ => None,
        }
    }
}

/// Result type alias for workbook operations.
pub type Result<T> = std::result::Result<T, WorkbookError>;
