//! XLSX writer

use std::collections::HashSet;
use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::XlsxStyleTable;
use budget_sheets_core::{CellAddress, CellRange, CellValue, Style, MAX_SHEET_NAME_LEN};

/// Characters Excel does not accept in sheet names
const INVALID_SHEET_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// A cell value together with the style it is written with
#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    pub value: CellValue,
    pub style: Style,
}

impl StyledCell {
    pub fn new<V: Into<CellValue>>(value: V, style: &Style) -> Self {
        Self {
            value: value.into(),
            style: style.clone(),
        }
    }

    /// An empty cell that still carries a style
    pub fn blank(style: &Style) -> Self {
        Self::new(CellValue::Empty, style)
    }
}

/// One worksheet to write: a name and its rows, top to bottom
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub rows: Vec<Vec<StyledCell>>,
}

impl SheetData {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<StyledCell>) {
        self.rows.push(row);
    }
}

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write sheets to a file path
    pub fn write_file<P: AsRef<Path>>(sheets: &[SheetData], path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(sheets, file)
    }

    /// Write sheets into an in-memory workbook
    pub fn write_to_vec(sheets: &[SheetData]) -> XlsxResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        Self::write(sheets, &mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Write sheets to a writer
    pub fn write<W: Write + Seek>(sheets: &[SheetData], writer: W) -> XlsxResult<()> {
        Self::validate_sheet_names(sheets)?;

        let mut style_table = XlsxStyleTable::new();
        for cell in sheets.iter().flat_map(|s| s.rows.iter().flatten()) {
            style_table.intern(&cell.style);
        }

        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip, sheets.len())?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, sheets)?;
        Self::write_workbook_rels(&mut zip, sheets.len())?;
        Self::write_styles_xml(&mut zip, &style_table)?;

        for (i, sheet) in sheets.iter().enumerate() {
            Self::write_worksheet(&mut zip, i, sheet, &style_table)?;
        }

        zip.finish()?;
        debug!(
            sheets = sheets.len(),
            styles = style_table.len(),
            "wrote workbook"
        );
        Ok(())
    }

    /// Check that every sheet name is accepted by Excel and unique
    /// (case-insensitively) within the workbook
    pub fn validate_sheet_names(sheets: &[SheetData]) -> XlsxResult<()> {
        if sheets.is_empty() {
            return Err(XlsxError::NoSheets);
        }

        let mut seen = HashSet::with_capacity(sheets.len());
        for sheet in sheets {
            let name = sheet.name.as_str();
            let invalid = |reason: &str| XlsxError::InvalidSheetName {
                name: name.to_string(),
                reason: reason.to_string(),
            };

            if name.is_empty() {
                return Err(invalid("name is empty"));
            }
            if name.chars().count() > MAX_SHEET_NAME_LEN {
                return Err(invalid("name is longer than 31 characters"));
            }
            if name.contains(INVALID_SHEET_NAME_CHARS) {
                return Err(invalid("name contains one of [ ] : * ? / \\"));
            }
            if name.starts_with('\'') || name.ends_with('\'') {
                return Err(invalid("name starts or ends with an apostrophe"));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(invalid("duplicate sheet name"));
            }
        }
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet_count: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..sheet_count {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheets: &[SheetData],
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in sheets.iter().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(&sheet.name),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet_count: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..sheet_count {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        // Styles relationship
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            sheet_count + 1
        ));

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(style_table.to_styles_xml().as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        index: usize,
        sheet: &SheetData,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        if let Some(range) = Self::used_range(sheet) {
            content.push_str(&format!("\n    <dimension ref=\"{}\"/>", range));
        }
        content.push_str("\n    <sheetData>");

        for (row, cells) in sheet.rows.iter().enumerate() {
            let row = u32::try_from(row)
                .map_err(|_| XlsxError::InvalidFormat(format!("Too many rows in '{}'", sheet.name)))?;
            content.push_str(&format!("\n        <row r=\"{}\">", row + 1));

            for (col, cell) in cells.iter().enumerate() {
                let col = u16::try_from(col).map_err(|_| {
                    XlsxError::InvalidFormat(format!("Too many columns in '{}'", sheet.name))
                })?;
                let cell_ref = CellAddress::new(row, col).to_a1_string();
                Self::write_cell(&mut content, &cell_ref, cell, style_table.xf_id(&cell.style));
            }

            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Range covering every written cell, `None` for an empty sheet
    fn used_range(sheet: &SheetData) -> Option<CellRange> {
        let width = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return None;
        }
        let last_row = u32::try_from(sheet.rows.len() - 1).ok()?;
        let last_col = u16::try_from(width - 1).ok()?;
        Some(CellRange::from_indices(0, 0, last_row, last_col))
    }

    fn write_cell(content: &mut String, cell_ref: &str, cell: &StyledCell, xf_id: u32) {
        let style_attr = if xf_id != 0 {
            format!(" s=\"{}\"", xf_id)
        } else {
            String::new()
        };

        match &cell.value {
            CellValue::Number(n) if n.is_finite() => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><v>{}</v></c>",
                    cell_ref, style_attr, n
                ));
            }
            CellValue::Text(s) if !s.is_empty() => {
                let padded = s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace);
                let space_attr = if padded { " xml:space=\"preserve\"" } else { "" };
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                    cell_ref,
                    style_attr,
                    space_attr,
                    escape_text(s)
                ));
            }
            CellValue::Boolean(b) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                    cell_ref,
                    style_attr,
                    u8::from(*b)
                ));
            }
            // Empty, empty text or a non-finite number: keep the style only
            _ => {
                if xf_id != 0 {
                    content.push_str(&format!("\n            <c r=\"{}\"{}/>", cell_ref, style_attr));
                }
            }
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Escape cell text: XML entities plus Excel's `_xHHHH_` form for control
/// characters XML cannot carry and for literal `_xHHHH_` sequences.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '_' if is_excel_escape(&s[i..]) => out.push_str("_x005F_"),
            '\t' | '\n' => out.push(c),
            c if (c as u32) < 0x20 => out.push_str(&format!("_x{:04X}_", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// `_xHHHH_` at the start of `s`
fn is_excel_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 7
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}
