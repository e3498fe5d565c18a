//! In-memory tables loaded from one sheet

use std::collections::HashSet;

use crate::cell::CellValue;
use crate::error::{Error, Result};

/// Detected or declared kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnKind {
    /// Numbers; formatted as currency on screen
    Numeric,
    /// Anything else; passed through unchanged
    #[default]
    Text,
}

impl ColumnKind {
    /// Infer the kind of a column from its raw cells.
    ///
    /// A column is numeric when every non-empty cell is a number. A column
    /// with no values at all also counts as numeric.
    pub fn infer(cells: &[CellValue]) -> Self {
        let all_numbers = cells
            .iter()
            .filter(|c| !c.is_empty())
            .all(CellValue::is_number);
        if all_numbers {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    header: String,
    kind: ColumnKind,
    cells: Vec<CellValue>,
}

impl Column {
    /// Create a column with an inferred kind
    pub fn new<S: Into<String>>(header: S, cells: Vec<CellValue>) -> Self {
        let kind = ColumnKind::infer(&cells);
        Self {
            header: header.into(),
            kind,
            cells,
        }
    }

    /// Create a column with an explicit kind
    pub fn with_kind<S: Into<String>>(header: S, kind: ColumnKind, cells: Vec<CellValue>) -> Self {
        Self {
            header: header.into(),
            kind,
            cells,
        }
    }

    /// Header name
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Column kind
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Cells in row order
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether the column has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered set of equally long, named columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a raw sheet grid whose first row holds the headers.
    ///
    /// Short rows are padded with empty cells, trailing rows without any value
    /// are dropped, empty headers become `Unnamed: <index>` and repeated
    /// headers get a `.<n>` suffix. Column kinds are inferred.
    pub fn from_grid(mut grid: Vec<Vec<CellValue>>) -> Self {
        while grid
            .last()
            .map_or(false, |row| row.iter().all(CellValue::is_empty))
            && grid.len() > 1
        {
            grid.pop();
        }

        if grid.is_empty() {
            return Self::new();
        }

        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut rows = grid.into_iter();
        let header_row = rows.next().unwrap_or_default();
        let headers = unique_headers(&header_row, width);

        let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); width];
        for mut row in rows {
            row.resize(width, CellValue::Empty);
            for (col, cell) in row.into_iter().enumerate() {
                columns[col].push(cell);
            }
        }

        let row_count = columns.first().map_or(0, Vec::len);
        let columns = headers
            .into_iter()
            .zip(columns)
            .map(|(header, cells)| Column::new(header, cells))
            .collect();

        Self { columns, row_count }
    }

    /// Assemble a table from columns already known to share `row_count`
    pub(crate) fn from_parts(columns: Vec<Column>, row_count: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == row_count));
        Self { columns, row_count }
    }

    /// Build a table from headers and rows, inferring column kinds.
    ///
    /// Short rows are padded with empty cells; a row longer than the header
    /// list is an error.
    pub fn from_rows<S: Into<String>>(headers: Vec<S>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let width = headers.len();

        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); width];
        for mut row in rows {
            if row.len() > width {
                return Err(Error::RowWidthMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
            row.resize(width, CellValue::Empty);
            for (col, cell) in row.into_iter().enumerate() {
                columns[col].push(cell);
            }
        }

        let mut table = Self::new();
        for (header, cells) in headers.into_iter().zip(columns) {
            table.push_column(Column::new(header, cells))?;
        }
        Ok(table)
    }

    /// Append a column; its length must match the existing columns
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if !self.columns.is_empty() && column.len() != self.row_count {
            return Err(Error::RowWidthMismatch {
                expected: self.row_count,
                actual: column.len(),
            });
        }
        self.row_count = column.len();
        self.columns.push(column);
        Ok(())
    }

    /// Declare the kind of a column, overriding the inferred one
    pub fn set_column_kind(&mut self, header: &str, kind: ColumnKind) -> Result<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.header == header)
            .ok_or_else(|| Error::ColumnNotFound(header.to_string()))?;
        column.kind = kind;
        Ok(())
    }

    /// Copy of the table keeping only rows where every column has a value.
    ///
    /// Empty and NaN cells count as missing; column kinds are kept.
    pub fn without_incomplete_rows(&self) -> Table {
        let keep: Vec<usize> = (0..self.row_count)
            .filter(|&row| self.columns.iter().all(|c| !c.cells[row].is_missing()))
            .collect();

        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                header: c.header.clone(),
                kind: c.kind,
                cells: keep.iter().map(|&row| c.cells[row].clone()).collect(),
            })
            .collect();
        Table::from_parts(columns, keep.len())
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Find a column by exact, case-sensitive header name
    pub fn column(&self, header: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.header == header)
    }

    /// Position of a column by exact header name
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.header == header)
    }

    /// Header names in order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.header.as_str())
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows (the header row is not counted)
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Check whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Get a cell by row and column index
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.columns.get(col).and_then(|c| c.cells.get(row))
    }

    /// Cells of one row, in column order
    pub fn row(&self, row: usize) -> Option<Vec<&CellValue>> {
        if row >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[row]).collect())
    }
}

fn unique_headers(header_row: &[CellValue], width: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(width);
    let mut headers = Vec::with_capacity(width);

    for col in 0..width {
        let base = match header_row.get(col) {
            Some(CellValue::Empty) | None => format!("Unnamed: {}", col),
            Some(CellValue::Text(s)) if s.trim().is_empty() => format!("Unnamed: {}", col),
            Some(value) => value.to_string(),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid() -> Vec<Vec<CellValue>> {
        vec![
            vec!["AÇÃO".into(), "PAGAMENTO REALIZADO".into(), "".into()],
            vec!["Custeio".into(), 1500.0.into(), "x".into()],
            vec!["Total".into(), CellValue::Empty],
            vec![CellValue::Empty, CellValue::Empty],
        ]
    }

    #[test]
    fn test_from_grid_headers_and_padding() {
        let table = Table::from_grid(grid());
        let headers: Vec<&str> = table.headers().collect();
        assert_eq!(headers, vec!["AÇÃO", "PAGAMENTO REALIZADO", "Unnamed: 2"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 2), Some(&CellValue::Empty));
    }

    #[test]
    fn test_kind_inference() {
        let table = Table::from_grid(grid());
        assert_eq!(table.columns()[0].kind(), ColumnKind::Text);
        assert_eq!(table.columns()[1].kind(), ColumnKind::Numeric);
        assert_eq!(table.columns()[2].kind(), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(&[CellValue::Empty]), ColumnKind::Numeric);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let table = Table::from_grid(vec![vec!["VALOR".into(), "VALOR".into(), "VALOR".into()]]);
        let headers: Vec<&str> = table.headers().collect();
        assert_eq!(headers, vec!["VALOR", "VALOR.1", "VALOR.2"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_rows_rejects_wide_rows() {
        let err = Table::from_rows(vec!["A"], vec![vec![1.0.into(), 2.0.into()]]).unwrap_err();
        assert!(matches!(err, Error::RowWidthMismatch { expected: 1, actual: 2 }));
    }

    #[test]
    fn test_set_column_kind() {
        let mut table = Table::from_rows(vec!["A"], vec![vec!["12".into()]]).unwrap();
        assert_eq!(table.columns()[0].kind(), ColumnKind::Text);
        table.set_column_kind("A", ColumnKind::Numeric).unwrap();
        assert_eq!(table.column("A").unwrap().kind(), ColumnKind::Numeric);
        assert!(matches!(
            table.set_column_kind("a", ColumnKind::Numeric),
            Err(Error::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_row_access() {
        let table = Table::from_grid(grid());
        let row = table.row(0).unwrap();
        assert_eq!(row[0], &CellValue::text("Custeio"));
        assert!(table.row(2).is_none());
    }

    #[test]
    fn test_without_incomplete_rows() {
        let mut table = Table::from_rows(
            vec!["PROGRAMA", "RECEBIDO", "OBS"],
            vec![
                vec!["PNAE".into(), 60.0.into(), "ok".into()],
                vec!["PDDE".into(), CellValue::Empty, "ok".into()],
                vec!["PNLD".into(), f64::NAN.into(), "ok".into()],
                vec!["PNATE".into(), 0.0.into(), "".into()],
                vec![CellValue::Empty, 10.0.into(), "ok".into()],
            ],
        )
        .unwrap();
        table.set_column_kind("OBS", ColumnKind::Numeric).unwrap();

        let complete = table.without_incomplete_rows();
        assert_eq!(complete.row_count(), 2);
        assert_eq!(complete.cell(0, 0), Some(&CellValue::text("PNAE")));
        assert_eq!(complete.cell(1, 0), Some(&CellValue::text("PNATE")));
        assert_eq!(complete.column("OBS").unwrap().kind(), ColumnKind::Numeric);
    }
}
