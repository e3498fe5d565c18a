//! Chart types

use budget_sheets_core::{NormalizedCell, Table};

use crate::axis::Axis;
use crate::error::{ChartError, ChartResult};
use crate::legend::{Legend, LegendPosition};
use crate::series::DataSeries;

/// Chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChartType {
    /// One value column, one bar per category
    Bar,
    /// Several value columns side by side per category
    GroupedBar,
    /// One value column, one slice per category
    Pie,
}

/// Chart definition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    /// Chart type
    pub chart_type: ChartType,
    /// Chart title
    pub title: Option<String>,
    /// Category labels (X data), shared by every series
    pub categories: Vec<String>,
    /// Data series
    pub series: Vec<DataSeries>,
    /// Category axis (X)
    pub category_axis: Option<Axis>,
    /// Value axis (Y)
    pub value_axis: Option<Axis>,
    /// Legend
    pub legend: Option<Legend>,
}

impl Chart {
    /// Create a new chart
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            title: None,
            categories: Vec::new(),
            series: Vec::new(),
            category_axis: None,
            value_axis: None,
            legend: None,
        }
    }

    /// Set chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a data series
    pub fn add_series(&mut self, series: DataSeries) {
        self.series.push(series);
    }

    /// Bar chart of one value column.
    ///
    /// `category` names the label column; `None` uses the first column.
    pub fn bar(table: &Table, category: Option<&str>, column: &str) -> ChartResult<Self> {
        let data = ChartData::collect(table, category, &[column])?;
        let mut chart = Chart::new(ChartType::Bar).with_title(format!("Gráfico de Barras - {}", column));
        chart.category_axis = Some(Axis::new().with_title(data.category_header.clone()));
        chart.value_axis = Some(Axis::new().with_title(column));
        Ok(data.into_chart(chart))
    }

    /// Grouped bar chart comparing several value columns per category
    pub fn grouped_bar(table: &Table, category: Option<&str>, columns: &[&str]) -> ChartResult<Self> {
        let data = ChartData::collect(table, category, columns)?;
        let mut chart = Chart::new(ChartType::GroupedBar)
            .with_title(format!("Comparativo de Valores - {}", columns.join(" vs ")));
        chart.category_axis = Some(Axis::new().with_title(data.category_header.clone()));
        chart.value_axis = Some(Axis::new().with_title("Valor"));
        chart.legend = Some(Legend::new(LegendPosition::Right));
        Ok(data.into_chart(chart))
    }

    /// Pie chart of one value column, one slice per category
    pub fn pie(table: &Table, category: Option<&str>, column: &str) -> ChartResult<Self> {
        let data = ChartData::collect(table, category, &[column])?;
        let mut chart = Chart::new(ChartType::Pie).with_title(format!("Distribuição - {}", column));
        chart.legend = Some(Legend::new(LegendPosition::Right).with_title(data.category_header.clone()));
        Ok(data.into_chart(chart))
    }
}

/// Categories and series pulled out of a table
struct ChartData {
    category_header: String,
    categories: Vec<String>,
    series: Vec<DataSeries>,
}

impl ChartData {
    /// Pull the category column and value columns out of `table`.
    ///
    /// Only rows with a value in every column of the table are charted, and
    /// of those a row is skipped when any selected value is not a number.
    /// Infinite values count as zero.
    fn collect(table: &Table, category: Option<&str>, columns: &[&str]) -> ChartResult<Self> {
        if columns.is_empty() {
            return Err(ChartError::NoValueColumns);
        }
        let table = &table.without_incomplete_rows();

        let category_column = match category {
            Some(name) => table
                .column(name)
                .ok_or_else(|| ChartError::MissingColumn(name.to_string()))?,
            None => table.columns().first().ok_or(ChartError::EmptyTable)?,
        };

        let value_columns = columns
            .iter()
            .map(|name| {
                table
                    .column(name)
                    .ok_or_else(|| ChartError::MissingColumn(name.to_string()))
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let mut categories = Vec::new();
        let mut series: Vec<DataSeries> = columns.iter().map(|c| DataSeries::new(*c)).collect();

        for row in 0..table.row_count() {
            let label = &category_column.cells()[row];
            if label.is_empty() {
                continue;
            }

            let amounts: Option<Vec<f64>> = value_columns
                .iter()
                .map(|c| NormalizedCell::from_numeric(&c.cells()[row]).amount())
                .collect();
            let Some(amounts) = amounts else {
                continue;
            };

            categories.push(label.to_string());
            for (s, amount) in series.iter_mut().zip(amounts) {
                s.push(amount);
            }
        }

        Ok(Self {
            category_header: category_column.header().to_string(),
            categories,
            series,
        })
    }

    fn into_chart(self, mut chart: Chart) -> Chart {
        chart.categories = self.categories;
        for s in self.series {
            chart.add_series(s);
        }
        chart
    }
}
