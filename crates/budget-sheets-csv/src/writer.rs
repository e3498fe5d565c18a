//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use budget_sheets_core::Table;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a table to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        table: &Table,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(table, file, options)
    }

    /// Write a table to a string
    pub fn write_to_string(table: &Table, options: &CsvWriteOptions) -> CsvResult<String> {
        let mut buf = Vec::new();
        Self::write(table, &mut buf, options)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write a table to a writer; empty cells become empty fields
    pub fn write<W: Write>(table: &Table, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        if options.write_header && table.width() > 0 {
            csv_writer.write_record(table.headers())?;
        }

        for row in 0..table.row_count() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|c| c.cells()[row].to_string())
                .collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
