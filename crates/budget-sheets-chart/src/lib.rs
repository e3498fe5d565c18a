//! # budget-sheets-chart
//!
//! Chart data preparation for budget-sheets: bar, grouped-bar and pie
//! charts built from table columns, with currency labels on every point.
//! Rendering is left to the presentation layer.

mod axis;
mod chart;
mod error;
mod legend;
mod series;

pub use axis::Axis;
pub use chart::{Chart, ChartType};
pub use error::{ChartError, ChartResult};
pub use legend::{Legend, LegendPosition};
pub use series::DataSeries;
