//! Raw cell values as read from a source sheet

use std::fmt;

/// Represents the value stored in a source cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// Text value
    Text(String),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell has no usable value (empty or NaN)
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Check if the cell holds a number
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    /// Try to get the value as a number without coercing text
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Coerce the cell to a float, the way a numeric column is read.
    ///
    /// Text is trimmed and parsed; anything that does not parse is `None`.
    /// Infinities and NaN are returned as-is so the caller can apply its own
    /// policy to them.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            other => other.as_number(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(n: Option<f64>) -> Self {
        n.map_or(CellValue::Empty, CellValue::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(CellValue::Number(2.5).coerce_number(), Some(2.5));
        assert_eq!(CellValue::text(" 12.5 ").coerce_number(), Some(12.5));
        assert_eq!(CellValue::text("abc").coerce_number(), None);
        assert_eq!(CellValue::text("").coerce_number(), None);
        assert_eq!(CellValue::Empty.coerce_number(), None);
        assert_eq!(CellValue::Boolean(true).coerce_number(), Some(1.0));
        assert_eq!(
            CellValue::text("inf").coerce_number(),
            Some(f64::INFINITY)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(5.0).to_string(), "5");
        assert_eq!(CellValue::Number(5.25).to_string(), "5.25");
        assert_eq!(CellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
