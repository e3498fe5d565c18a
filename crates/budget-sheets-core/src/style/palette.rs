//! Row palettes for the dashboard screen and the exported workbook

use super::{Color, Style};
use crate::classify::RowStyle;

/// Styles assigned to the header row and to each [`RowStyle`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowPalette {
    pub header: Style,
    pub even: Style,
    pub odd: Style,
    pub total: Style,
}

impl RowPalette {
    /// Palette used when rendering tables on screen.
    ///
    /// Every body row is bold; totals are white on near-black.
    pub fn screen() -> Self {
        Self {
            header: Style::new().bold(true),
            even: Style::new()
                .bold(true)
                .fill_color(Color::rgb(0x70, 0x80, 0x90))
                .font_color(Color::WHITE),
            odd: Style::new()
                .bold(true)
                .fill_color(Color::rgb(0xE6, 0xE6, 0xE6))
                .font_color(Color::BLACK),
            total: Style::new()
                .bold(true)
                .fill_color(Color::rgb(0x1C, 0x1C, 0x1C))
                .font_color(Color::WHITE),
        }
    }

    /// Palette used for sheets in the exported workbook
    pub fn export() -> Self {
        Self {
            header: Style::new()
                .bold(true)
                .fill_color(Color::rgb(0xD3, 0xD3, 0xD3)),
            even: Style::new().fill_color(Color::rgb(0xF0, 0xF0, 0xF0)),
            odd: Style::new().fill_color(Color::rgb(0xE6, 0xE6, 0xE6)),
            total: Style::new()
                .bold(true)
                .fill_color(Color::rgb(0x4B, 0x00, 0x82))
                .font_color(Color::WHITE),
        }
    }

    /// Style for a classified body row
    pub fn style_for(&self, row: RowStyle) -> &Style {
        match row {
            RowStyle::Total => &self.total,
            RowStyle::Even => &self.even,
            RowStyle::Odd => &self.odd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FillStyle;

    #[test]
    fn test_screen_palette() {
        let palette = RowPalette::screen();
        assert_eq!(
            palette.style_for(RowStyle::Total).to_css(),
            "background-color: #1C1C1C; color: #FFFFFF; font-weight: bold"
        );
        assert_eq!(
            palette.style_for(RowStyle::Odd).to_css(),
            "background-color: #E6E6E6; color: #000000; font-weight: bold"
        );
    }

    #[test]
    fn test_export_palette() {
        let palette = RowPalette::export();
        assert_eq!(
            palette.header.fill,
            FillStyle::solid(Color::rgb(0xD3, 0xD3, 0xD3))
        );
        assert!(palette.header.font.bold);
        assert!(!palette.even.font.bold);
        assert_eq!(palette.total.fill.color(), Color::from_hex("#4B0082"));
        assert_eq!(palette.total.font.color, Color::WHITE);
    }
}
