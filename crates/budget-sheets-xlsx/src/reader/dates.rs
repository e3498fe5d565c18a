//! Excel date serials (1900 date system)

use chrono::{Days, NaiveDate, NaiveTime};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Largest serial Excel accepts (9999-12-31)
const MAX_SERIAL: f64 = 2_958_466.0;

/// Render a date serial the way a dataframe prints a timestamp.
///
/// Midnight values print as `YYYY-MM-DD`, serials below 1 as a bare time,
/// anything else as `YYYY-MM-DD HH:MM:SS`. Returns `None` for negative or
/// out-of-range serials.
pub(crate) fn serial_to_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || !(0.0..MAX_SERIAL).contains(&serial) {
        return None;
    }

    let total_secs = (serial * SECONDS_PER_DAY).round() as u64;
    let days = total_secs / 86_400;
    let secs = (total_secs % 86_400) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)?;

    if days == 0 {
        return Some(time.format("%H:%M:%S").to_string());
    }

    // Serial 60 is the nonexistent 1900-02-29; earlier serials sit one day later
    let offset = if days < 60 { days + 1 } else { days };
    let date = NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(offset))?;

    if secs == 0 {
        Some(date.format("%Y-%m-%d").to_string())
    } else {
        Some(date.and_time(time).format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_dates() {
        assert_eq!(serial_to_text(1.0).as_deref(), Some("1900-01-01"));
        assert_eq!(serial_to_text(59.0).as_deref(), Some("1900-02-28"));
        assert_eq!(serial_to_text(61.0).as_deref(), Some("1900-03-01"));
        assert_eq!(serial_to_text(45658.0).as_deref(), Some("2025-01-01"));
        assert_eq!(serial_to_text(45678.0).as_deref(), Some("2025-01-21"));
    }

    #[test]
    fn test_serial_times() {
        assert_eq!(serial_to_text(0.75).as_deref(), Some("18:00:00"));
        assert_eq!(
            serial_to_text(45658.5).as_deref(),
            Some("2025-01-01 12:00:00")
        );
    }

    #[test]
    fn test_out_of_range_serials() {
        assert_eq!(serial_to_text(-1.0), None);
        assert_eq!(serial_to_text(f64::NAN), None);
        assert_eq!(serial_to_text(3_000_000.0), None);
    }
}
