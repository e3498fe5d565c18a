//! Chart error types

use thiserror::Error;

/// Result type for chart preparation
pub type ChartResult<T> = std::result::Result<T, ChartError>;

/// Errors that can occur while preparing chart data
#[derive(Debug, Error)]
pub enum ChartError {
    /// A requested column is not in the source table
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// A chart needs at least one value column
    #[error("No value columns selected")]
    NoValueColumns,

    /// The source table has no columns to take categories from
    #[error("Table has no columns")]
    EmptyTable,
}
