//! Error types for budget-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in budget-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u16, u16),

    /// Column not found by header name
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Row length does not match the table width
    #[error("Row has {actual} cells, table has {expected} columns")]
    RowWidthMismatch { expected: usize, actual: usize },
}
