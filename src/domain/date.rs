//! Date formatting helpers for the contact list and edit form.

use chrono::{DateTime, Datelike, NaiveDate};

/// Parse a date string as either a bare calendar date or an RFC 3339 timestamp.
fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Ordinal suffix for a day of the month ("st", "nd", "rd", "th").
fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Format a date string for display, e.g. "January 15th, 2024".
///
/// Invalid input is returned unchanged; this function never fails.
pub fn format_date(input: &str) -> String {
    let Some(date) = parse_date(input) else {
        return input.to_string();
    };

    let day = date.day();
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

/// Format a date string as `YYYY-MM-DD` for a date input field.
///
/// Invalid input is returned unchanged; this function never fails.
pub fn format_date_for_input(input: &str) -> String {
    match parse_date(input) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_valid() {
        assert_eq!(format_date("2024-01-15"), "January 15th, 2024");
        assert_eq!(format_date("2024-02-01"), "February 1st, 2024");
        assert_eq!(format_date("2024-03-02"), "March 2nd, 2024");
        assert_eq!(format_date("2024-03-03"), "March 3rd, 2024");
        assert_eq!(format_date("2024-03-11"), "March 11th, 2024");
        assert_eq!(format_date("2024-03-22"), "March 22nd, 2024");
    }

    #[test]
    fn test_format_date_datetime_input() {
        assert_eq!(format_date("2024-01-15T10:30:00Z"), "January 15th, 2024");
        assert_eq!(
            format_date("2024-01-15T10:30:00.000Z"),
            "January 15th, 2024"
        );
    }

    #[test]
    fn test_format_date_invalid_is_identity() {
        assert_eq!(format_date("invalid-date"), "invalid-date");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_format_date_for_input() {
        assert_eq!(format_date_for_input("2024-01-15"), "2024-01-15");
        assert_eq!(format_date_for_input("2024-12-31"), "2024-12-31");
        assert_eq!(format_date_for_input("2024-01-15T10:30:00Z"), "2024-01-15");
        assert_eq!(format_date_for_input("2024-02-05"), "2024-02-05");
    }

    #[test]
    fn test_format_date_for_input_invalid_is_identity() {
        assert_eq!(format_date_for_input("garbage"), "garbage");
        assert_eq!(format_date_for_input(""), "");
    }
}
