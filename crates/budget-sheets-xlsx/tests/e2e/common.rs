//! Common utilities for E2E tests.

use std::path::PathBuf;

use budget_sheets_core::{RowPalette, Style};
use budget_sheets_xlsx::{SheetData, StyledCell};
use tempfile::TempDir;

/// Create a temporary directory and a workbook path inside it.
///
/// The directory is removed when the returned guard is dropped.
pub fn temp_workbook(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    (dir, path)
}

/// Build a sheet from a header row and body rows, styled with the export palette.
pub fn styled_sheet(name: &str, header: &[&str], rows: Vec<Vec<StyledValue>>) -> SheetData {
    let palette = RowPalette::export();
    let mut sheet = SheetData::new(name);
    sheet.push_row(
        header
            .iter()
            .map(|h| StyledCell::new(*h, &palette.header))
            .collect(),
    );
    for (i, row) in rows.into_iter().enumerate() {
        let style: &Style = if i % 2 == 0 { &palette.even } else { &palette.odd };
        sheet.push_row(
            row.into_iter()
                .map(|v| match v {
                    StyledValue::Text(s) => StyledCell::new(s, style),
                    StyledValue::Number(n) => StyledCell::new(n, style),
                    StyledValue::Blank => StyledCell::blank(style),
                })
                .collect(),
        );
    }
    sheet
}

/// Shorthand cell values for [`styled_sheet`]
#[allow(dead_code)]
pub enum StyledValue {
    Text(&'static str),
    Number(f64),
    Blank,
}
