//! # budget-sheets
//!
//! Currency-aware spreadsheet dashboards for public budget tables.
//!
//! Tables are read from XLSX or CSV files, their numeric columns are
//! formatted as Brazilian Real amounts, and every row is tagged for zebra
//! striping with highlighted total rows. The same normalized tables are shown
//! on screen and exported to a styled workbook.
//!
//! ## Features
//!
//! - Load tables from XLSX and CSV sources
//! - `R$ 1.234,56` currency formatting with a `-` placeholder for missing values
//! - Zebra and total row styles for screen (CSS) and workbook export
//! - Multi-sheet styled XLSX export
//! - Bar, grouped bar and pie chart data
//!
//! ## Example
//!
//! ```rust
//! use budget_sheets::prelude::*;
//!
//! let table = Table::from_rows(
//!     vec!["AÇÃO", "VALOR"],
//!     vec![
//!         vec!["Custeio".into(), 1234.5.into()],
//!         vec!["TOTAL".into(), 1234.5.into()],
//!     ],
//! )
//! .unwrap();
//!
//! let section = Section::new("20RL (CUSTEIO)", normalize(&table));
//! let bytes = export_workbook(&[section], &ExportOptions::default()).unwrap();
//! assert!(!bytes.is_empty());
//! ```

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod loader;
pub mod prelude;

pub use charts::{build_chart, chart_table_section, ChartView, CHART_TABLE_NAME};
pub use config::{ChartConfig, DashboardConfig, SourceConfig};
pub use dashboard::{Dashboard, LoadFailure, Section, StyledRow};
pub use error::{ChartViewError, ConfigError, ExportError, ExportResult, LoadError, LoadResult};
pub use export::{
    export_to_file, export_workbook, section_sheet, ExportOptions, NumericCells,
    DEFAULT_EXPORT_FILE_NAME, EXPORT_MIME,
};
pub use loader::{load_source, load_table, sheet_names, SourceFormat};

// Re-export core types
pub use budget_sheets_core::{
    classify_row, classify_rows, format_currency, format_optional_currency, mentions_total,
    normalize, parse_currency, CellValue, Color, Column, ColumnKind, NormalizedCell,
    NormalizedColumn, NormalizedTable, RowPalette, RowStyle, Style, Table,
    CURRENCY_NUMBER_FORMAT, CURRENCY_PREFIX, PLACEHOLDER,
};

// Re-export chart types
pub use budget_sheets_chart::{
    Axis, Chart, ChartError, ChartType, DataSeries, Legend, LegendPosition,
};

// Re-export I/O types
pub use budget_sheets_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use budget_sheets_xlsx::{SheetData, StyledCell, XlsxError, XlsxReader, XlsxWriter};

use std::path::Path;

/// Extension trait for [`Table`] to add file loading
pub trait TableExt {
    /// Open a table from an XLSX or CSV file
    fn open<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> LoadResult<Table>;

    /// Open a table and normalize it in one step
    fn open_normalized<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> LoadResult<NormalizedTable>;
}

impl TableExt for Table {
    fn open<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> LoadResult<Table> {
        load_table(path, sheet)
    }

    fn open_normalized<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> LoadResult<NormalizedTable> {
        load_table(path, sheet).map(|table| normalize(&table))
    }
}
