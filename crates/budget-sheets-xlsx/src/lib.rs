//! # budget-sheets-xlsx
//!
//! XLSX (Office Open XML) reader and writer for budget-sheets.
//!
//! The reader loads one worksheet as a [`Table`](budget_sheets_core::Table);
//! the writer produces a styled workbook from [`SheetData`] grids.

pub mod error;
pub mod reader;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::{SheetData, StyledCell, XlsxWriter};
