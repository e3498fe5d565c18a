//! XLSX reader

mod dates;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::debug;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::read_date_xfs;
use budget_sheets_core::{CellAddress, CellValue, Table};

/// Upper bound on `rows * columns` of the dense grid built from a sheet
pub const MAX_GRID_CELLS: u64 = 10_000_000;

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        let mut hex_chars = String::new();
        let mut is_escape = false;
        let mut saw_x = false;

        if chars.peek() == Some(&'x') {
            chars.next();
            saw_x = true;

            for _ in 0..4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                chars.next();
                if let Some(decoded) =
                    u32::from_str_radix(&hex_chars, 16).ok().and_then(char::from_u32)
                {
                    result.push(decoded);
                    is_escape = true;
                }
            }
        }

        if !is_escape {
            result.push('_');
            if saw_x {
                result.push('x');
                result.push_str(&hex_chars);
            }
        }
    }

    result
}

/// One worksheet entry from `xl/workbook.xml`
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    r_id: String,
}

/// XLSX file reader
///
/// Reads a single worksheet into a [`Table`] whose first row holds the
/// column headers. Only cell values are read, except that numbers shown
/// with a date or time format load as text (`2025-01-21`).
pub struct XlsxReader;

impl XlsxReader {
    /// Read one sheet of a workbook file; `None` selects the first sheet
    pub fn read_file<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> XlsxResult<Table> {
        let file = File::open(path)?;
        Self::read(file, sheet)
    }

    /// Read one sheet of a workbook from a reader; `None` selects the first sheet
    pub fn read<R: Read + Seek>(reader: R, sheet: Option<&str>) -> XlsxResult<Table> {
        let mut archive = Self::open_archive(reader)?;

        let sheets = Self::read_workbook_xml(&mut archive)?;
        let entry = Self::select_sheet(&sheets, sheet)?;

        let sheet_paths = Self::read_workbook_rels(&mut archive)?;
        let path = sheet_paths.get(&entry.r_id).ok_or_else(|| {
            XlsxError::MissingPart(format!("worksheet relationship {}", entry.r_id))
        })?;

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let date_xfs = Self::read_date_styles(&mut archive)?;
        let grid = Self::read_worksheet(&mut archive, path, &shared_strings, &date_xfs)?;
        debug!(sheet = %entry.name, rows = grid.len(), "read worksheet");

        Ok(Table::from_grid(grid))
    }

    /// List the sheet names of a workbook file, in workbook order
    pub fn sheet_names_from_file<P: AsRef<Path>>(path: P) -> XlsxResult<Vec<String>> {
        let file = File::open(path)?;
        Self::sheet_names(file)
    }

    /// List the sheet names of a workbook, in workbook order
    pub fn sheet_names<R: Read + Seek>(reader: R) -> XlsxResult<Vec<String>> {
        let mut archive = Self::open_archive(reader)?;
        let sheets = Self::read_workbook_xml(&mut archive)?;
        Ok(sheets.into_iter().map(|s| s.name).collect())
    }

    fn open_archive<R: Read + Seek>(reader: R) -> XlsxResult<zip::ZipArchive<R>> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        Ok(archive)
    }

    fn select_sheet<'a>(sheets: &'a [SheetEntry], name: Option<&str>) -> XlsxResult<&'a SheetEntry> {
        match name {
            None => sheets.first().ok_or(XlsxError::NoSheets),
            Some(name) => sheets
                .iter()
                .find(|s| s.name == name)
                .ok_or_else(|| XlsxError::SheetNotFound {
                    name: name.to_string(),
                    available: sheets.iter().map(|s| s.name.clone()).collect(),
                }),
        }
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => {
                        in_t = true;
                    }
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read which cell styles format numbers as dates
    fn read_date_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Vec<bool>> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_date_xfs(file),
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<SheetEntry>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let name = attr_value(&e, b"name");
                    let r_id = attr_value(&e, b"r:id");

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push(SheetEntry { name, r_id });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet into a dense grid of raw cell values
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        shared_strings: &[String],
        date_xfs: &[bool],
    ) -> XlsxResult<Vec<Vec<CellValue>>> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut cells: Vec<(u32, u16, CellValue)> = Vec::new();

        // Position of the next row/cell when `r` attributes are omitted
        let mut next_row: u32 = 0;
        let mut current_row: u32 = 0;
        let mut next_col: u16 = 0;

        // Current cell state
        let mut current_cell: Option<CellAddress> = None;
        let mut current_cell_type: Option<String> = None;
        let mut current_is_date = false;
        let mut current_value: Option<String> = None;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = Self::row_index(&e).unwrap_or(next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        let addr = Self::cell_address(&e, current_row, next_col)?;
                        next_col = addr.col.saturating_add(1);
                        current_cell = Some(addr);
                        current_cell_type = attr_value(&e, b"t");
                        current_is_date = attr_value(&e, b"s")
                            .and_then(|s| s.parse::<usize>().ok())
                            .and_then(|xf| date_xfs.get(xf).copied())
                            .unwrap_or(false);
                        current_value = None;
                    }
                    b"v" => in_value = true,
                    b"is" => in_inline_str = true,
                    b"t" if in_inline_str => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = Self::row_index(&e).unwrap_or(next_row);
                        next_row = current_row + 1;
                    }
                    b"c" => {
                        // Style-only cell without a value
                        let addr = Self::cell_address(&e, current_row, next_col)?;
                        next_col = addr.col.saturating_add(1);
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(addr) = current_cell.take() {
                            let mut value = Self::process_cell(
                                current_cell_type.as_deref(),
                                current_value.as_deref(),
                                shared_strings,
                            )?;
                            if current_is_date {
                                value = Self::date_cell(value);
                            }
                            if !value.is_empty() {
                                cells.push((addr.row, addr.col, value));
                            }
                        }
                        current_cell_type = None;
                        current_value = None;
                    }
                    b"v" => in_value = false,
                    b"is" => in_inline_str = false,
                    b"t" if in_inline_str => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_value {
                        if let Ok(text) = e.unescape() {
                            current_value = Some(text.to_string());
                        }
                    } else if in_inline_text {
                        if let Ok(text) = e.unescape() {
                            // Rich inline strings arrive as several runs
                            current_value
                                .get_or_insert_with(String::new)
                                .push_str(&text);
                            current_cell_type = Some("inlineStr".to_string());
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Self::into_grid(cells)
    }

    fn row_index(e: &BytesStart<'_>) -> Option<u32> {
        attr_value(e, b"r")
            .and_then(|s| s.parse::<u32>().ok())
            .and_then(|r| r.checked_sub(1))
    }

    fn cell_address(e: &BytesStart<'_>, row: u32, next_col: u16) -> XlsxResult<CellAddress> {
        match attr_value(e, b"r") {
            Some(cell_ref) => CellAddress::parse(&cell_ref).map_err(|err| {
                XlsxError::Parse(format!("Invalid cell reference '{}': {}", cell_ref, err))
            }),
            None => Ok(CellAddress::new(row, next_col)),
        }
    }

    /// Convert a cell's type and raw text into a value.
    ///
    /// Formula cells contribute their cached result; error cells load as empty.
    fn process_cell(
        cell_type: Option<&str>,
        value: Option<&str>,
        shared_strings: &[String],
    ) -> XlsxResult<CellValue> {
        let Some(value) = value else {
            return Ok(CellValue::Empty);
        };

        let cell_value = match cell_type {
            // Shared string
            Some("s") => {
                let idx: usize = value.parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", value))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?;
                CellValue::Text(s.clone())
            }

            // Boolean
            Some("b") => CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true")),

            // Error (#DIV/0!, #N/A, ...)
            Some("e") => CellValue::Empty,

            // Inline string / formula string - decode Excel escape sequences
            Some("inlineStr") | Some("str") => CellValue::Text(decode_excel_escapes(value)),

            // Number (default type or explicit "n")
            None | Some("n") => match value.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::Text(value.to_string()),
            },

            // Unknown type (ISO dates, ...) - treat as text
            Some(_) => CellValue::Text(value.to_string()),
        };

        Ok(cell_value)
    }

    /// Date-formatted numbers become their printed date
    fn date_cell(value: CellValue) -> CellValue {
        match value {
            CellValue::Number(serial) => match dates::serial_to_text(serial) {
                Some(text) => CellValue::Text(text),
                None => CellValue::Number(serial),
            },
            other => other,
        }
    }

    fn into_grid(cells: Vec<(u32, u16, CellValue)>) -> XlsxResult<Vec<Vec<CellValue>>> {
        let Some(max_row) = cells.iter().map(|(row, _, _)| *row).max() else {
            return Ok(Vec::new());
        };
        let width = cells
            .iter()
            .map(|(_, col, _)| usize::from(*col) + 1)
            .max()
            .unwrap_or(0);

        let rows = u64::from(max_row) + 1;
        if rows * width as u64 > MAX_GRID_CELLS {
            return Err(XlsxError::SheetTooLarge {
                rows,
                cols: width as u64,
            });
        }

        let mut grid = vec![vec![CellValue::Empty; width]; rows as usize];
        for (row, col, value) in cells {
            grid[row as usize][usize::from(col)] = value;
        }
        Ok(grid)
    }
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}
