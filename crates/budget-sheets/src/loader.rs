//! Spreadsheet loading, dispatched by file extension

use std::path::Path;

use budget_sheets_core::{ColumnKind, Table};
use budget_sheets_csv::{CsvReadOptions, CsvReader};
use budget_sheets_xlsx::XlsxReader;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::{LoadError, LoadResult};

/// Supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Xlsx,
    Csv,
}

impl SourceFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => Some(SourceFormat::Xlsx),
            Some("csv") => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

/// Load one table from a workbook or CSV file.
///
/// `sheet` selects a workbook sheet (the first one when `None`) and is
/// ignored for CSV files. The filesystem is read on every call.
pub fn load_table<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> LoadResult<Table> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let table = match format {
        SourceFormat::Xlsx => {
            XlsxReader::read_file(path, sheet).map_err(|source| LoadError::Xlsx {
                path: path.to_path_buf(),
                source,
            })?
        }
        SourceFormat::Csv => CsvReader::read_file(path, &CsvReadOptions::default()).map_err(
            |source| LoadError::Csv {
                path: path.to_path_buf(),
                source,
            },
        )?,
    };

    debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.width(),
        "loaded table"
    );
    Ok(table)
}

/// Load a configured source and apply its declared numeric columns
pub fn load_source(source: &SourceConfig) -> LoadResult<Table> {
    let mut table = load_table(&source.path, source.sheet.as_deref())?;
    for column in &source.numeric_columns {
        table
            .set_column_kind(column, ColumnKind::Numeric)
            .map_err(|err| LoadError::Column {
                path: source.path.clone(),
                source: err,
            })?;
    }
    Ok(table)
}

/// List the sheets of a workbook; a CSV file has a single unnamed sheet
pub fn sheet_names<P: AsRef<Path>>(path: P) -> LoadResult<Vec<String>> {
    let path = path.as_ref();
    match SourceFormat::from_path(path) {
        Some(SourceFormat::Xlsx) => {
            XlsxReader::sheet_names_from_file(path).map_err(|source| LoadError::Xlsx {
                path: path.to_path_buf(),
                source,
            })
        }
        Some(SourceFormat::Csv) => Ok(Vec::new()),
        None => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SourceFormat::from_path(Path::new("planilha20rl.XLSX")),
            Some(SourceFormat::Xlsx)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a.xlsm")),
            Some(SourceFormat::Xlsx)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("dados.csv")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(SourceFormat::from_path(Path::new("dados.xls")), None);
        assert_eq!(SourceFormat::from_path(Path::new("dados")), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_table("planilha.ods", None).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
        assert_eq!(err.path(), Path::new("planilha.ods"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_table("nao-existe.xlsx", None).unwrap_err();
        assert!(err.to_string().contains("nao-existe.xlsx"));
    }

    #[test]
    fn test_declared_numeric_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demanda.csv");
        fs::write(&path, "ITEM,VALOR\nPapel,\"12,50\"\nToner,30\n").unwrap();

        let mut source = SourceConfig::new("DEMANDA 2025", &path);
        let table = load_source(&source).unwrap();
        assert_eq!(table.column("VALOR").unwrap().kind(), ColumnKind::Text);

        source.numeric_columns = vec!["VALOR".to_string()];
        let table = load_source(&source).unwrap();
        assert_eq!(table.column("VALOR").unwrap().kind(), ColumnKind::Numeric);

        source.numeric_columns = vec!["PREÇO".to_string()];
        let err = load_source(&source).unwrap_err();
        assert!(matches!(err, LoadError::Column { .. }));
    }
}
