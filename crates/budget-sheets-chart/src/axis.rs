//! Axis types

/// Chart axis
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    /// Axis title
    pub title: Option<String>,
}

impl Axis {
    /// Create a new axis
    pub fn new() -> Self {
        Self::default()
    }

    /// Set axis title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }
}
