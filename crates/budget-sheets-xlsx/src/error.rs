//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading/writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid file format
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Requested sheet does not exist
    #[error("Sheet '{name}' not found (available: {})", available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    /// Used range too large to load as a table
    #[error("Sheet spans {rows} rows x {cols} columns, too large to load")]
    SheetTooLarge { rows: u64, cols: u64 },

    /// Workbook has no worksheets
    #[error("Workbook contains no worksheets")]
    NoSheets,

    /// Sheet name rejected on write
    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] budget_sheets_core::Error),
}
