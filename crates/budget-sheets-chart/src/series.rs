//! Data series types

use budget_sheets_core::format_currency;

/// Data series for a chart
///
/// `values` and `labels` are aligned with the chart's categories.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataSeries {
    /// Series name (the value column header)
    pub name: String,
    /// Values (Y data)
    pub values: Vec<f64>,
    /// Currency label shown on each data point
    pub labels: Vec<String>,
}

impl DataSeries {
    /// Create an empty data series
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Append a value and its currency label
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
        self.labels.push(format_currency(value));
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}
