//! Number format types

/// Number format for cell display in an exported workbook
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Custom format string
    Custom(String),
}

impl NumberFormat {
    /// First ID available for custom formats in a workbook
    pub const FIRST_CUSTOM_ID: u32 = 164;

    /// Create a number format from a format string
    pub fn from_string<S: Into<String>>(format: S) -> Self {
        let format = format.into();
        if format.eq_ignore_ascii_case("General") {
            NumberFormat::General
        } else {
            NumberFormat::Custom(format)
        }
    }

    /// Get the format string
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::Custom(s) => s,
        }
    }

    /// Check whether a built-in format ID displays a date or time
    pub fn is_builtin_date(id: u32) -> bool {
        matches!(id, 14..=22 | 45..=47)
    }

    /// Check if this is a date/time format.
    ///
    /// Quoted literals, `[...]` sections (colors, locales, elapsed-time
    /// brackets aside) and backslash escapes are skipped before looking for
    /// `d`, `m`, `y`, `h` or `s` placeholders.
    pub fn is_date_format(&self) -> bool {
        let NumberFormat::Custom(code) = self else {
            return false;
        };

        let mut chars = code.chars();
        while let Some(c) = chars.next() {
            match c.to_ascii_lowercase() {
                '"' => {
                    for q in chars.by_ref() {
                        if q == '"' {
                            break;
                        }
                    }
                }
                '[' => {
                    let section: String = chars.by_ref().take_while(|&b| b != ']').collect();
                    // [h], [mm], [ss] elapsed time
                    let lower = section.to_ascii_lowercase();
                    if !lower.is_empty() && lower.chars().all(|b| matches!(b, 'h' | 'm' | 's')) {
                        return true;
                    }
                }
                '\\' | '_' | '*' => {
                    chars.next();
                }
                'd' | 'm' | 'y' | 'h' | 's' => return true,
                _ => {}
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formats() {
        assert!(NumberFormat::from_string("dd/mm/yyyy").is_date_format());
        assert!(NumberFormat::from_string("[$-416]d/m/yy h:mm").is_date_format());
        assert!(NumberFormat::from_string("[h]:mm").is_date_format());
        assert!(NumberFormat::is_builtin_date(14));
        assert!(NumberFormat::is_builtin_date(47));
        assert!(!NumberFormat::is_builtin_date(4));
    }

    #[test]
    fn test_number_formats_are_not_dates() {
        assert!(!NumberFormat::from_string("General").is_date_format());
        assert!(!NumberFormat::from_string("\"R$ \"#,##0.00").is_date_format());
        assert!(!NumberFormat::from_string("[Red]#,##0.00;[$R$-416] -#,##0.00").is_date_format());
        assert!(!NumberFormat::from_string("0.00E+00").is_date_format());
        assert!(!NumberFormat::from_string("#,##0.00_);\\(#,##0.00\\)").is_date_format());
    }
}
