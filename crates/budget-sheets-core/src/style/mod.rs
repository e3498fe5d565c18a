//! Cell styling types
//!
//! This module contains types for row formatting:
//! - [`Style`] - Complete cell style
//! - [`FontStyle`] - Font settings
//! - [`FillStyle`] - Background fill
//! - [`Color`] - Color representation
//! - [`RowPalette`] - Styles assigned to each row classification

mod color;
mod fill;
mod font;
mod number_format;
mod palette;

pub use color::Color;
pub use fill::FillStyle;
pub use font::FontStyle;
pub use number_format::NumberFormat;
pub use palette::RowPalette;

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    /// Font settings
    pub font: FontStyle,
    /// Fill/background settings
    pub fill: FillStyle,
    /// Number format
    pub number_format: NumberFormat,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = FillStyle::Solid { color };
        self
    }

    /// Set number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = NumberFormat::from_string(format);
        self
    }

    /// Render as inline CSS declarations, e.g.
    /// `background-color: #708090; color: #FFFFFF; font-weight: bold`
    pub fn to_css(&self) -> String {
        let mut decls = Vec::with_capacity(3);
        if let Some(color) = self.fill.color() {
            decls.push(format!("background-color: {}", color.to_css()));
        }
        if !self.font.color.is_auto() {
            decls.push(format!("color: {}", self.font.color.to_css()));
        }
        if self.font.bold {
            decls.push("font-weight: bold".to_string());
        }
        decls.join("; ")
    }
}

impl std::hash::Hash for Style {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.font.hash(state);
        self.fill.hash(state);
        self.number_format.hash(state);
    }
}

impl Eq for Style {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_order() {
        let style = Style::new()
            .bold(true)
            .fill_color(Color::rgb(0x70, 0x80, 0x90))
            .font_color(Color::WHITE);
        assert_eq!(
            style.to_css(),
            "background-color: #708090; color: #FFFFFF; font-weight: bold"
        );
    }

    #[test]
    fn test_default_css_is_empty() {
        assert_eq!(Style::new().to_css(), "");
    }
}
