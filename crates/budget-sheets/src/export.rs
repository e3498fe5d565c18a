//! Styled workbook export
//!
//! Every section becomes one sheet: a header row, then the data rows styled
//! by their [`RowStyle`](budget_sheets_core::RowStyle). Cells shown as the
//! `-` placeholder on screen are written as empty cells.

use std::fs;
use std::io::Write;
use std::path::Path;

use budget_sheets_core::{NormalizedCell, RowPalette, Style, CURRENCY_NUMBER_FORMAT};
use budget_sheets_xlsx::{SheetData, StyledCell, XlsxWriter};
use tracing::debug;

use crate::dashboard::Section;
use crate::error::{ExportError, ExportResult};

/// Default file name of the exported workbook
pub const DEFAULT_EXPORT_FILE_NAME: &str = "Orcamento_Publico_2025.xlsx";

/// MIME type of the exported workbook
pub const EXPORT_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// How amounts from numeric columns are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericCells {
    /// The formatted currency string, as shown on screen
    #[default]
    Text,
    /// The raw number with a currency number format
    Number,
}

/// Export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub numeric_cells: NumericCells,
    pub palette: RowPalette,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            numeric_cells: NumericCells::default(),
            palette: RowPalette::export(),
        }
    }
}

impl ExportOptions {
    pub fn with_numeric_cells(mut self, numeric_cells: NumericCells) -> Self {
        self.numeric_cells = numeric_cells;
        self
    }
}

/// Lay out one section as a styled sheet
pub fn section_sheet(section: &Section, options: &ExportOptions) -> SheetData {
    let palette = &options.palette;
    let table = &section.table;
    let mut sheet = SheetData::new(section.name.clone());

    sheet.push_row(
        table
            .headers()
            .map(|h| StyledCell::new(h, &palette.header))
            .collect(),
    );

    for (row, &row_style) in table.row_styles().iter().enumerate() {
        let style = palette.style_for(row_style);
        let amount_style = match options.numeric_cells {
            NumericCells::Number => style.clone().number_format(CURRENCY_NUMBER_FORMAT),
            NumericCells::Text => style.clone(),
        };

        let cells = table
            .columns()
            .iter()
            .map(|column| export_cell(&column.cells()[row], style, &amount_style, options))
            .collect();
        sheet.push_row(cells);
    }

    sheet
}

fn export_cell(
    cell: &NormalizedCell,
    style: &Style,
    amount_style: &Style,
    options: &ExportOptions,
) -> StyledCell {
    // Shown as a placeholder or zero on screen, empty in the workbook
    if cell.is_blank_on_export() {
        return StyledCell::blank(style);
    }

    match cell {
        NormalizedCell::Amount(n) => match options.numeric_cells {
            NumericCells::Text => StyledCell::new(cell.display().into_owned(), style),
            NumericCells::Number => StyledCell::new(*n, amount_style),
        },
        NormalizedCell::Raw(value) => StyledCell::new(value.clone(), style),
        NormalizedCell::Missing | NormalizedCell::ZeroedInfinity => StyledCell::blank(style),
    }
}

/// Encode all sections into one workbook.
///
/// The whole workbook is built in memory; nothing is returned on failure.
pub fn export_workbook(sections: &[Section], options: &ExportOptions) -> ExportResult<Vec<u8>> {
    let sheets: Vec<SheetData> = sections
        .iter()
        .map(|s| section_sheet(s, options))
        .collect();
    let bytes = XlsxWriter::write_to_vec(&sheets)?;
    debug!(sheets = sheets.len(), bytes = bytes.len(), "encoded workbook");
    Ok(bytes)
}

/// Encode all sections and write the workbook to `path`.
///
/// The bytes go to a temporary file in the destination directory which is
/// renamed over `path` once complete, so a failed export never leaves a
/// partial file behind.
pub fn export_to_file<P: AsRef<Path>>(
    sections: &[Section],
    path: P,
    options: &ExportOptions,
) -> ExportResult<()> {
    let path = path.as_ref();
    let bytes = export_workbook(sections, options)?;

    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    debug!(path = %path.display(), "wrote workbook");
    Ok(())
}
