//! Fill/background style types

use super::Color;

/// Fill style for cell background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillStyle {
    /// No fill (transparent)
    #[default]
    None,

    /// Solid color fill
    Solid { color: Color },
}

impl FillStyle {
    /// Create a solid fill with the given color
    pub fn solid(color: Color) -> Self {
        FillStyle::Solid { color }
    }

    /// Check if this is a "no fill"
    pub fn is_none(&self) -> bool {
        matches!(self, FillStyle::None)
    }

    /// Background color, if any
    pub fn color(&self) -> Option<Color> {
        match self {
            FillStyle::None => None,
            FillStyle::Solid { color } => Some(*color),
        }
    }
}
