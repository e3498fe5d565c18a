//! Error types for loading, exporting and configuration

use std::path::{Path, PathBuf};

use budget_sheets_chart::ChartError;
use budget_sheets_csv::CsvError;
use budget_sheets_xlsx::XlsxError;
use thiserror::Error;

/// Result type for loading tables
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Result type for exports
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// A table could not be loaded; always names the offending file
#[derive(Debug, Error)]
pub enum LoadError {
    /// Workbook could not be opened or parsed, or the sheet is missing
    #[error("failed to read {}: {source}", .path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// CSV file could not be opened or parsed
    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: CsvError,
    },

    /// File extension is neither a workbook nor CSV
    #[error("unsupported file format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A declared numeric column is not in the table
    #[error("{}: {source}", .path.display())]
    Column {
        path: PathBuf,
        #[source]
        source: budget_sheets_core::Error,
    },
}

impl LoadError {
    /// The file that failed to load
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Xlsx { path, .. }
            | LoadError::Csv { path, .. }
            | LoadError::UnsupportedFormat { path }
            | LoadError::Column { path, .. } => path,
        }
    }
}

/// The workbook could not be produced or written
#[derive(Debug, Error)]
pub enum ExportError {
    /// Encoding failed (invalid sheet name, zip/XML failure)
    #[error("failed to encode workbook: {0}")]
    Encode(#[from] XlsxError),

    /// Writing the finished workbook failed
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration file could not be read
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A chart view could not be prepared
#[derive(Debug, Error)]
pub enum ChartViewError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    /// No chart source is configured
    #[error("no chart source configured")]
    NotConfigured,

    /// The requested column is not one of the configured views
    #[error("unknown chart view '{view}' (available: compare, {})", .available.join(", "))]
    UnknownView { view: String, available: Vec<String> },

    /// Pie charts show a single column
    #[error("pie charts need a single column view")]
    PieNeedsColumn,
}
