//! XLSX styles (styles.xml) reading and writing

use std::collections::HashMap;
use std::io::{BufReader, Read};

use ahash::AHashMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

use budget_sheets_core::style::{Color, FillStyle, FontStyle, NumberFormat, Style};

/// Workbook-wide, deduplicated cell styles.
///
/// Index 0 is always the default style; every other distinct [`Style`] gets
/// the next `cellXfs` index in first-seen order.
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    styles: Vec<Style>,
    style_to_xf: AHashMap<Style, u32>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    num_fmt_id: u32,
}

impl XlsxStyleTable {
    pub(crate) fn new() -> Self {
        let default = Style::default();
        let mut style_to_xf = AHashMap::new();
        style_to_xf.insert(default.clone(), 0);
        Self {
            styles: vec![default],
            style_to_xf,
        }
    }

    /// Register a style and return its xf index
    pub(crate) fn intern(&mut self, style: &Style) -> u32 {
        if let Some(&id) = self.style_to_xf.get(style) {
            return id;
        }
        let id = self.styles.len() as u32;
        self.styles.push(style.clone());
        self.style_to_xf.insert(style.clone(), id);
        id
    }

    /// Look up the xf index of a style registered with [`intern`](Self::intern)
    pub(crate) fn xf_id(&self, style: &Style) -> u32 {
        self.style_to_xf.get(style).copied().unwrap_or(0)
    }

    pub(crate) fn len(&self) -> usize {
        self.styles.len()
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        // Build component tables
        let mut font_ids: AHashMap<FontStyle, u32> = AHashMap::new();
        let mut fonts: Vec<FontStyle> = Vec::new();

        let default_font = FontStyle::default();
        fonts.push(default_font.clone());
        font_ids.insert(default_font, 0);

        // Excel requires the first two fills to be: none and gray125
        let mut fill_ids: AHashMap<FillStyle, u32> = AHashMap::new();
        let mut fills: Vec<FillStyle> = Vec::new();

        // Custom number formats
        let mut numfmt_ids: AHashMap<String, u32> = AHashMap::new();
        let mut numfmts: Vec<(u32, String)> = Vec::new();
        let mut next_numfmt_id = NumberFormat::FIRST_CUSTOM_ID;

        let mut resolved: Vec<ResolvedXfIds> = Vec::with_capacity(self.styles.len());

        for style in &self.styles {
            let font_id = match font_ids.get(&style.font) {
                Some(&id) => id,
                None => {
                    let id = fonts.len() as u32;
                    fonts.push(style.font.clone());
                    font_ids.insert(style.font.clone(), id);
                    id
                }
            };

            let fill_id = match style.fill {
                FillStyle::None => 0,
                other => match fill_ids.get(&other) {
                    Some(&id) => id,
                    None => {
                        // Offset past the two reserved fills
                        let id = fills.len() as u32 + 2;
                        fills.push(other);
                        fill_ids.insert(other, id);
                        id
                    }
                },
            };

            let num_fmt_id = match &style.number_format {
                NumberFormat::General => 0,
                NumberFormat::Custom(code) => match numfmt_ids.get(code) {
                    Some(&id) => id,
                    None => {
                        let id = next_numfmt_id;
                        next_numfmt_id += 1;
                        numfmt_ids.insert(code.clone(), id);
                        numfmts.push((id, code.clone()));
                        id
                    }
                },
            };

            resolved.push(ResolvedXfIds {
                font_id,
                fill_id,
                num_fmt_id,
            });
        }

        // Write XML
        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml_attr(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        // Fonts
        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        // Fills
        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len() + 2));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for fill in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(fill));
        }
        xml.push_str("\n  </fills>");

        // Borders
        xml.push_str(
            r#"
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>"#,
        );

        // cellStyleXfs (required)
        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        // cellXfs
        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, ids) in self.styles.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, *ids));
        }
        xml.push_str("\n  </cellXfs>");

        // cellStyles (required)
        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>"#,
        );

        xml.push_str("\n</styleSheet>");
        xml
    }
}

fn escape_xml_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn write_color(tag: &str, color: &Color) -> String {
    match color {
        Color::Auto => format!("<{tag} indexed=\"64\"/>"),
        Color::Rgb { .. } => format!("<{tag} rgb=\"{}\"/>", color.to_argb_hex()),
    }
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if !font.color.is_auto() {
        s.push_str(&write_color("color", &font.color));
    }
    s.push_str(&format!("<name val=\"{}\"/>", escape_xml_attr(&font.name)));
    s.push_str("</font>");
    s
}

fn write_fill(fill: &FillStyle) -> String {
    match fill {
        FillStyle::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        FillStyle::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
            write_color("fgColor", color)
        ),
    }
}

fn write_xf(style: &Style, ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if style.font != FontStyle::default() {
        attrs.push_str(" applyFont=\"1\"");
    }
    if !style.fill.is_none() {
        attrs.push_str(" applyFill=\"1\"");
    }

    format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"0\" xfId=\"0\"{}/>",
        ids.num_fmt_id, ids.font_id, ids.fill_id, attrs
    )
}

/// Read which `cellXfs` entries display their number as a date or time.
///
/// The returned vector is indexed by the cell `s` attribute.
pub(crate) fn read_date_xfs<R: Read>(reader: R) -> XlsxResult<Vec<bool>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut numfmts: HashMap<u32, NumberFormat> = HashMap::new();
    let mut date_xfs = Vec::new();
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"cellXfs" => in_cell_xfs = true,
                // xf with alignment/protection children
                b"xf" if in_cell_xfs => date_xfs.push(is_date_xf(&e, &numfmts)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"numFmt" => {
                    let id = attr_u32(&e, b"numFmtId");
                    let code = e
                        .attributes()
                        .flatten()
                        .find(|attr| attr.key.as_ref() == b"formatCode")
                        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()));
                    if let (Some(id), Some(code)) = (id, code) {
                        numfmts.insert(id, NumberFormat::from_string(code));
                    }
                }
                b"xf" if in_cell_xfs => date_xfs.push(is_date_xf(&e, &numfmts)),
                _ => {}
            },
            Ok(Event::End(e)) if e.name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(date_xfs)
}

fn is_date_xf(e: &BytesStart<'_>, numfmts: &HashMap<u32, NumberFormat>) -> bool {
    let id = attr_u32(e, b"numFmtId").unwrap_or(0);
    match numfmts.get(&id) {
        Some(format) => format.is_date_format(),
        None => NumberFormat::is_builtin_date(id),
    }
}

fn attr_u32(e: &BytesStart<'_>, key: &[u8]) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().and_then(|s| s.parse().ok()))
}
