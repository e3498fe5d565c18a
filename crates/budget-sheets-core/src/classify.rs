//! Row classification for total and zebra styling

/// Presentational class of a data row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RowStyle {
    /// A row whose formatted content mentions "total"
    Total,
    /// Even row index (0, 2, 4, ...)
    Even,
    /// Odd row index (1, 3, 5, ...)
    Odd,
}

impl RowStyle {
    /// Short lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStyle::Total => "total",
            RowStyle::Even => "even",
            RowStyle::Odd => "odd",
        }
    }
}

/// Check whether a formatted cell mentions "total", ignoring case
pub fn mentions_total(text: &str) -> bool {
    text.to_lowercase().contains("total")
}

/// Classify one row from its formatted cell strings.
///
/// Any cell containing "total" (any case, anywhere in the string) makes the
/// row a [`RowStyle::Total`]; otherwise the row index parity decides.
pub fn classify_row<S: AsRef<str>>(index: usize, formatted: &[S]) -> RowStyle {
    if formatted.iter().any(|cell| mentions_total(cell.as_ref())) {
        RowStyle::Total
    } else if index % 2 == 0 {
        RowStyle::Even
    } else {
        RowStyle::Odd
    }
}

/// Classify every row of a formatted table
pub fn classify_rows(rows: &[Vec<String>]) -> Vec<RowStyle> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| classify_row(i, row.as_slice()))
        .collect()
}
