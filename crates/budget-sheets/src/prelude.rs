//! Prelude module - common imports for budget-sheets users
//!
//! ```rust
//! use budget_sheets::prelude::*;
//! ```

pub use crate::{
    // Loading and dashboards
    build_chart,
    chart_table_section,
    export_to_file,
    export_workbook,
    load_table,
    normalize,
    ChartView,
    Dashboard,
    DashboardConfig,
    ExportOptions,
    NumericCells,
    Section,
    // Extension traits
    TableExt,

    // Table types
    CellValue,
    ColumnKind,
    NormalizedCell,
    NormalizedTable,
    RowPalette,
    RowStyle,
    Table,

    // Formatting
    format_currency,
    Style,

    // Chart types
    Chart,
    ChartType,

    // Error types
    ChartViewError,
    ExportError,
    LoadError,
};
