//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use budget_sheets_core::{CellValue, Table};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a table
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Table> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a table.
    ///
    /// Records may have differing lengths; short rows are padded. Without a
    /// header row, columns are named by their index.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut grid: Vec<Vec<CellValue>> = Vec::new();
        for (idx, result) in csv_reader.records().enumerate() {
            let record = result?;

            let row = record
                .iter()
                .map(|field| {
                    if options.auto_detect_types && !(options.has_header && idx == 0) {
                        Self::detect_type(field)
                    } else {
                        CellValue::text(field)
                    }
                })
                .collect();
            grid.push(row);
        }

        if !options.has_header {
            let width = grid.iter().map(Vec::len).max().unwrap_or(0);
            grid.insert(0, (0..width).map(|i| CellValue::Text(i.to_string())).collect());
        }

        debug!(rows = grid.len(), "read csv");
        Ok(Table::from_grid(grid))
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            return CellValue::Number(n);
        }

        CellValue::text(field)
    }
}
