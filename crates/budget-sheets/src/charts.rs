//! Chart views over the configured chart table

use std::fmt;
use std::str::FromStr;

use budget_sheets_chart::Chart;
use budget_sheets_core::{normalize, ColumnKind};
use tracing::debug;

use crate::config::ChartConfig;
use crate::dashboard::Section;
use crate::error::{ChartViewError, LoadError, LoadResult};
use crate::loader::load_table;

/// Name of the chart table shown next to the charts
pub const CHART_TABLE_NAME: &str = "Planilha Completa";

/// Which chart to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartView {
    /// Grouped bars over the configured comparison columns
    Compare,
    /// A single value column
    Column(String),
}

impl FromStr for ChartView {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("compare") {
            Ok(ChartView::Compare)
        } else {
            Ok(ChartView::Column(s.to_string()))
        }
    }
}

impl fmt::Display for ChartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartView::Compare => f.write_str("compare"),
            ChartView::Column(name) => f.write_str(name),
        }
    }
}

/// Load the chart table and build the requested view.
///
/// The table is read from disk on every call. `pie` draws a single column
/// as a pie instead of bars and is rejected for the comparison view.
pub fn build_chart(
    config: &ChartConfig,
    view: &ChartView,
    pie: bool,
) -> Result<Chart, ChartViewError> {
    if let ChartView::Column(column) = view {
        if !config.columns.is_empty() && !config.columns.iter().any(|c| c == column) {
            return Err(ChartViewError::UnknownView {
                view: column.clone(),
                available: config.columns.clone(),
            });
        }
    }
    if pie && *view == ChartView::Compare {
        return Err(ChartViewError::PieNeedsColumn);
    }

    let table = load_table(&config.path, config.sheet.as_deref())?;
    let category = config.category_column.as_deref();

    let chart = match view {
        ChartView::Compare => {
            let columns: Vec<&str> = config.compare_columns.iter().map(String::as_str).collect();
            Chart::grouped_bar(&table, category, &columns)?
        }
        ChartView::Column(column) if pie => Chart::pie(&table, category, column)?,
        ChartView::Column(column) => Chart::bar(&table, category, column)?,
    };

    debug!(
        %view,
        categories = chart.categories.len(),
        series = chart.series.len(),
        total = chart.series.first().map_or(0.0, |s| s.total()),
        "built chart"
    );
    Ok(chart)
}

/// The chart table itself, as charted: rows complete in every column, every
/// column after the first shown as currency.
pub fn chart_table_section(config: &ChartConfig) -> LoadResult<Section> {
    let mut table = load_table(&config.path, config.sheet.as_deref())?.without_incomplete_rows();

    let value_columns: Vec<String> = table.headers().skip(1).map(str::to_string).collect();
    for column in &value_columns {
        table
            .set_column_kind(column, ColumnKind::Numeric)
            .map_err(|source| LoadError::Column {
                path: config.path.clone(),
                source,
            })?;
    }

    Ok(Section::new(CHART_TABLE_NAME, normalize(&table)))
}
