//! # budget-sheets-core
//!
//! Core data structures for the budget-sheets dashboard.
//!
//! This crate provides the fundamental types used throughout budget-sheets:
//! - [`CellValue`] - Raw cell values as loaded from a sheet
//! - [`Table`] - Named, typed columns of one sheet
//! - [`normalize`] - Currency formatting and placeholder substitution
//! - [`classify_rows`] - Zebra and total row classification
//! - [`Style`] and [`RowPalette`] - Row styling for screen and export
//!
//! ## Example
//!
//! ```rust
//! use budget_sheets_core::{normalize, CellValue, RowStyle, Table};
//!
//! let table = Table::from_rows(
//!     vec!["AÇÃO", "VALOR"],
//!     vec![
//!         vec!["Custeio".into(), 1234.5.into()],
//!         vec!["Total".into(), CellValue::Empty],
//!     ],
//! )
//! .unwrap();
//!
//! let normalized = normalize(&table);
//! assert_eq!(normalized.display_row(0).unwrap(), ["Custeio", "R$ 1.234,50"]);
//! assert_eq!(normalized.display_row(1).unwrap(), ["Total", "-"]);
//! assert_eq!(normalized.row_styles(), [RowStyle::Even, RowStyle::Total]);
//! ```

pub mod cell;
pub mod classify;
pub mod currency;
pub mod error;
pub mod normalize;
pub mod style;
pub mod table;

// Re-exports for convenience
pub use cell::{CellAddress, CellRange, CellValue};
pub use classify::{classify_row, classify_rows, mentions_total, RowStyle};
pub use currency::{
    format_currency, format_optional_currency, parse_currency, CURRENCY_NUMBER_FORMAT,
    CURRENCY_PREFIX, PLACEHOLDER,
};
pub use error::{Error, Result};
pub use normalize::{normalize, NormalizedCell, NormalizedColumn, NormalizedTable};
pub use table::{Column, ColumnKind, Table};

pub use style::{Color, FillStyle, FontStyle, NumberFormat, RowPalette, Style};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
