//! Legend types

/// Chart legend
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Legend {
    /// Position
    pub position: LegendPosition,
    /// Legend title
    pub title: Option<String>,
}

impl Legend {
    /// Create a new legend
    pub fn new(position: LegendPosition) -> Self {
        Self {
            position,
            title: None,
        }
    }

    /// Set legend title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Legend position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LegendPosition {
    #[default]
    Right,
    Top,
    Bottom,
    Left,
}
