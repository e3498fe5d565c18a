//! Brazilian Real currency formatting
//!
//! Amounts are rendered as `R$ 1.234,56`: two fractional digits, `.` as the
//! thousands separator and `,` as the decimal separator. Rounding happens on
//! the exact binary value of the `f64`, half to even, so `2.675` (stored as
//! `2.67499…`) renders as `R$ 2,67`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Prefix put in front of every formatted amount
pub const CURRENCY_PREFIX: &str = "R$ ";

/// Placeholder shown on screen for a missing numeric value
pub const PLACEHOLDER: &str = "-";

/// Excel number format equivalent to [`format_currency`]
pub const CURRENCY_NUMBER_FORMAT: &str = "\"R$ \"#,##0.00";

const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Format an amount as Brazilian Real.
///
/// NaN renders as the [`PLACEHOLDER`]. Infinities render as zero, the same
/// policy numeric columns apply during normalization.
///
/// ```
/// use budget_sheets_core::format_currency;
///
/// assert_eq!(format_currency(1234.5), "R$ 1.234,50");
/// assert_eq!(format_currency(-7.1), "R$ -7,10");
/// ```
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return PLACEHOLDER.to_string();
    }
    let value = if value.is_infinite() { 0.0 } else { value };

    let (negative, digits) = match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
            (
                rounded.is_sign_negative() && !rounded.is_zero(),
                format!("{:.2}", rounded.abs()),
            )
        }
        // Beyond Decimal's range; fall back to the float formatter.
        None => (value < 0.0, format!("{:.2}", value.abs())),
    };

    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut out = String::with_capacity(CURRENCY_PREFIX.len() + digits.len() + digits.len() / 3 + 1);
    out.push_str(CURRENCY_PREFIX);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    out.push(DECIMAL_SEPARATOR);
    out.push_str(fraction);
    out
}

/// Format an optional amount; `None` renders as the [`PLACEHOLDER`].
pub fn format_optional_currency(value: Option<f64>) -> String {
    match value {
        Some(v) => format_currency(v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Parse a string produced by [`format_currency`] back into an amount.
///
/// Returns `None` for the placeholder or anything that is not a formatted
/// amount.
pub fn parse_currency(text: &str) -> Option<f64> {
    let body = text.trim().strip_prefix(CURRENCY_PREFIX.trim_end())?.trim_start();
    if body.is_empty() {
        return None;
    }

    let mut plain = String::with_capacity(body.len());
    for c in body.chars() {
        match c {
            GROUP_SEPARATOR => {}
            DECIMAL_SEPARATOR => plain.push('.'),
            '-' | '0'..='9' => plain.push(c),
            _ => return None,
        }
    }
    plain.parse::<f64>().ok()
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_format_basic_amounts() {
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(-7.1), "R$ -7,10");
        assert_eq!(format_currency(999.999), "R$ 1.000,00");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_currency(-1_234_567.891), "R$ -1.234.567,89");
        assert_eq!(format_currency(12.0), "R$ 12,00");
    }

    #[test]
    fn test_rounding_uses_exact_binary_value() {
        assert_eq!(format_currency(2.675), "R$ 2,67");
        assert_eq!(format_currency(0.125), "R$ 0,12");
        assert_eq!(format_currency(0.375), "R$ 0,38");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_currency(-0.0), "R$ 0,00");
        assert_eq!(format_currency(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_currency(f64::NAN), "-");
        assert_eq!(format_currency(f64::INFINITY), "R$ 0,00");
        assert_eq!(format_currency(f64::NEG_INFINITY), "R$ 0,00");
        assert_eq!(format_optional_currency(None), "-");
        assert_eq!(format_optional_currency(Some(5.0)), "R$ 5,00");
    }

    #[test]
    fn test_huge_values_fall_back() {
        let text = format_currency(1e30);
        assert!(text.starts_with("R$ 1.000.000"));
        assert!(text.ends_with(",00"));
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("R$ 1.234,50"), Some(1234.5));
        assert_eq!(parse_currency("R$ -7,10"), Some(-7.1));
        assert_eq!(parse_currency("-"), None);
        assert_eq!(parse_currency("R$ "), None);
        assert_eq!(parse_currency("1.234,50"), None);
        assert_eq!(parse_currency("R$ 12abc"), None);
    }

    fn matches_pattern(text: &str) -> bool {
        let Some(body) = text.strip_prefix("R$ ") else {
            return false;
        };
        let body = body.strip_prefix('-').unwrap_or(body);
        let Some((integer, fraction)) = body.split_once(',') else {
            return false;
        };
        if fraction.len() != 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        let groups: Vec<&str> = integer.split('.').collect();
        let first_ok = (1..=3).contains(&groups[0].len());
        first_ok
            && groups.iter().all(|g| g.chars().all(|c| c.is_ascii_digit()))
            && groups[1..].iter().all(|g| g.len() == 3)
    }

    proptest! {
        #[test]
        fn prop_currency_round_trip(v in -1.0e12f64..1.0e12f64) {
            let text = format_currency(v);
            prop_assert!(matches_pattern(&text), "bad shape: {}", text);
            let parsed = parse_currency(&text).unwrap();
            prop_assert!((parsed - v).abs() <= 0.005 + 4.0 * f64::EPSILON * v.abs(), "{} -> {} -> {}", v, text, parsed);
        }
    }
}
