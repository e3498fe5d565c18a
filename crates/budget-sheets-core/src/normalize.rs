//! Currency-aware table normalization
//!
//! [`normalize`] runs numeric coercion and currency formatting over a raw
//! [`Table`] and classifies every row, producing a [`NormalizedTable`]. The
//! same normalized cells serve both the on-screen rendering (placeholder `-`
//! for missing amounts) and the spreadsheet export (empty cell), so the source
//! never has to be read twice.

use std::borrow::Cow;

use crate::cell::CellValue;
use crate::classify::{classify_rows, RowStyle};
use crate::currency::{format_currency, PLACEHOLDER};
use crate::table::{Column, ColumnKind, Table};

/// A cell after numeric coercion
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedCell {
    /// A finite amount from a numeric column
    Amount(f64),
    /// An infinite amount, shown as zero
    ZeroedInfinity,
    /// No usable value
    Missing,
    /// A value from a text column, passed through unchanged
    Raw(CellValue),
}

impl NormalizedCell {
    /// Coerce a cell of a numeric column
    pub fn from_numeric(cell: &CellValue) -> Self {
        match cell.coerce_number() {
            Some(n) if n.is_infinite() => NormalizedCell::ZeroedInfinity,
            Some(n) if n.is_nan() => NormalizedCell::Missing,
            Some(n) => NormalizedCell::Amount(n),
            None => NormalizedCell::Missing,
        }
    }

    /// Carry a cell of a text column
    pub fn from_text(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty => NormalizedCell::Missing,
            CellValue::Number(n) if n.is_nan() => NormalizedCell::Missing,
            CellValue::Number(n) if n.is_infinite() => NormalizedCell::Raw(CellValue::Number(0.0)),
            other => NormalizedCell::Raw(other.clone()),
        }
    }

    /// The amount this cell contributes; infinities count as zero
    pub fn amount(&self) -> Option<f64> {
        match self {
            NormalizedCell::Amount(n) => Some(*n),
            NormalizedCell::ZeroedInfinity => Some(0.0),
            _ => None,
        }
    }

    /// Check whether the cell is written as an empty cell on export.
    ///
    /// Besides missing and infinite amounts this covers text that is exactly
    /// the `-` placeholder, so a table that was already formatted once
    /// exports the same as the original.
    pub fn is_blank_on_export(&self) -> bool {
        match self {
            NormalizedCell::Missing | NormalizedCell::ZeroedInfinity => true,
            NormalizedCell::Raw(CellValue::Text(s)) => s == PLACEHOLDER,
            _ => false,
        }
    }

    /// On-screen representation
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            NormalizedCell::Amount(n) => Cow::Owned(format_currency(*n)),
            NormalizedCell::ZeroedInfinity => Cow::Owned(format_currency(0.0)),
            NormalizedCell::Missing => Cow::Borrowed(PLACEHOLDER),
            NormalizedCell::Raw(CellValue::Text(s)) => Cow::Borrowed(s),
            NormalizedCell::Raw(other) => Cow::Owned(other.to_string()),
        }
    }
}

/// A column after normalization
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedColumn {
    header: String,
    kind: ColumnKind,
    cells: Vec<NormalizedCell>,
}

impl NormalizedColumn {
    fn from_column(column: &Column) -> Self {
        let coerce = match column.kind() {
            ColumnKind::Numeric => NormalizedCell::from_numeric,
            ColumnKind::Text => NormalizedCell::from_text,
        };
        Self {
            header: column.header().to_string(),
            kind: column.kind(),
            cells: column.cells().iter().map(coerce).collect(),
        }
    }

    /// Header name
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Kind of the source column
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Normalized cells in row order
    pub fn cells(&self) -> &[NormalizedCell] {
        &self.cells
    }
}

/// Result of one normalization pass
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    columns: Vec<NormalizedColumn>,
    display: Vec<Vec<String>>,
    row_styles: Vec<RowStyle>,
}

impl NormalizedTable {
    /// Normalized columns
    pub fn columns(&self) -> &[NormalizedColumn] {
        &self.columns
    }

    /// Header names in order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.header.as_str())
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.display.len()
    }

    /// Check whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    /// Normalized cell at a position
    pub fn cell(&self, row: usize, col: usize) -> Option<&NormalizedCell> {
        self.columns.get(col).and_then(|c| c.cells.get(row))
    }

    /// Display strings, row-major
    pub fn display_rows(&self) -> &[Vec<String>] {
        &self.display
    }

    /// Display strings of one row
    pub fn display_row(&self, row: usize) -> Option<&[String]> {
        self.display.get(row).map(Vec::as_slice)
    }

    /// Style tag of every row
    pub fn row_styles(&self) -> &[RowStyle] {
        &self.row_styles
    }

    /// Style tag of one row
    pub fn row_style(&self, row: usize) -> Option<RowStyle> {
        self.row_styles.get(row).copied()
    }

    /// The display strings as a table of text columns.
    ///
    /// Every column of the result is [`ColumnKind::Text`], so normalizing it
    /// again leaves the strings untouched.
    pub fn to_display_table(&self) -> Table {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(col, column)| {
                let cells = self
                    .display
                    .iter()
                    .map(|row| CellValue::Text(row[col].clone()))
                    .collect();
                Column::with_kind(column.header.clone(), ColumnKind::Text, cells)
            })
            .collect();
        Table::from_parts(columns, self.display.len())
    }
}

/// Normalize a table: coerce numeric columns, format amounts, classify rows.
///
/// Numeric columns go through [`NormalizedCell::from_numeric`]; text columns
/// are passed through with empty cells turned into the placeholder. Only
/// columns of kind [`ColumnKind::Numeric`] are ever currency-formatted.
pub fn normalize(table: &Table) -> NormalizedTable {
    let columns: Vec<NormalizedColumn> = table
        .columns()
        .iter()
        .map(NormalizedColumn::from_column)
        .collect();

    let display: Vec<Vec<String>> = (0..table.row_count())
        .map(|row| {
            columns
                .iter()
                .map(|c| c.cells[row].display().into_owned())
                .collect()
        })
        .collect();

    let row_styles = classify_rows(&display);

    NormalizedTable {
        columns,
        display,
        row_styles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn budget_table() -> Table {
        Table::from_rows(
            vec!["AÇÃO", "PAGAMENTO REALIZADO", "SALDO DE EMPENHO"],
            vec![
                vec!["Custeio".into(), 1234.5.into(), (-7.1).into()],
                vec!["Bolsas".into(), CellValue::Empty, f64::INFINITY.into()],
                vec!["Total Geral".into(), 1234.5.into(), 0.0.into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_display_strings() {
        let normalized = normalize(&budget_table());
        assert_eq!(
            normalized.display_rows(),
            &[
                vec!["Custeio", "R$ 1.234,50", "R$ -7,10"],
                vec!["Bolsas", "-", "R$ 0,00"],
                vec!["Total Geral", "R$ 1.234,50", "R$ 0,00"],
            ]
        );
    }

    #[test]
    fn test_row_styles() {
        let normalized = normalize(&budget_table());
        assert_eq!(
            normalized.row_styles(),
            &[RowStyle::Even, RowStyle::Odd, RowStyle::Total]
        );
    }

    #[test]
    fn test_unparseable_text_in_numeric_column_is_missing() {
        let mut table = Table::from_rows(
            vec!["VALOR"],
            vec![
                vec!["abc".into()],
                vec!["".into()],
                vec!["  42.5 ".into()],
                vec![f64::NAN.into()],
            ],
        )
        .unwrap();
        table.set_column_kind("VALOR", ColumnKind::Numeric).unwrap();

        let normalized = normalize(&table);
        let shown: Vec<&str> = normalized
            .display_rows()
            .iter()
            .map(|r| r[0].as_str())
            .collect();
        assert_eq!(shown, vec!["-", "-", "R$ 42,50", "-"]);
        assert_eq!(normalized.cell(0, 0), Some(&NormalizedCell::Missing));
    }

    #[test]
    fn test_infinity_is_zero_on_screen_and_blank_on_export() {
        let normalized = normalize(&budget_table());
        let cell = normalized.cell(1, 2).unwrap();
        assert_eq!(cell, &NormalizedCell::ZeroedInfinity);
        assert_eq!(cell.display(), "R$ 0,00");
        assert_eq!(cell.amount(), Some(0.0));
        assert!(cell.is_blank_on_export());
    }

    #[test]
    fn test_text_column_empty_cells_show_placeholder() {
        let table = Table::from_rows(
            vec!["NOME", "OBS"],
            vec![vec!["a".into(), "x".into()], vec!["b".into(), CellValue::Empty]],
        )
        .unwrap();
        let normalized = normalize(&table);
        assert_eq!(normalized.display_row(1).unwrap(), &["b", "-"]);
        assert!(normalized.cell(1, 1).unwrap().is_blank_on_export());
    }

    #[test]
    fn test_placeholder_text_is_blank_on_export() {
        let table = Table::from_rows(
            vec!["AÇÃO", "OBS"],
            vec![vec!["Bolsas".into(), "-".into()], vec!["Custeio".into(), "- x".into()]],
        )
        .unwrap();
        let normalized = normalize(&table);
        let placeholder = normalized.cell(0, 1).unwrap();
        assert_eq!(placeholder.display(), "-");
        assert!(placeholder.is_blank_on_export());
        assert!(!normalized.cell(1, 1).unwrap().is_blank_on_export());
    }

    #[test]
    fn test_renormalizing_display_table_is_idempotent() {
        let first = normalize(&budget_table());
        let second = normalize(&first.to_display_table());
        assert_eq!(first.display_rows(), second.display_rows());
        assert_eq!(first.row_styles(), second.row_styles());
        assert!(second
            .columns()
            .iter()
            .all(|c| c.kind() == ColumnKind::Text));
    }

    #[test]
    fn test_empty_table() {
        let normalized = normalize(&Table::new());
        assert!(normalized.is_empty());
        assert_eq!(normalized.width(), 0);
    }
}
