//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Error returned when a date string cannot be displayed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid date string: {0}")]
    Invalid(String),
}

/// Format a date string as a long English date (like "January 5, 2024")
///
/// Unlike post ingestion, this is strict: an unparseable date is an error,
/// never a fallback string.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-05") // -> Ok("January 5, 2024")
/// ```
pub fn format_date(date: &str) -> Result<String, DateError> {
    let parsed = parse_date(date).ok_or_else(|| DateError::Invalid(date.to_string()))?;
    Ok(parsed.format("%B %-d, %Y").to_string())
}

/// Parse a date string in various formats
///
/// Date-only strings are calendar dates at midnight; no timezone shift is
/// applied. Strings carrying an offset are normalized to UTC.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // Year-only ("2024") and year-month ("2024-01") dates start at day 1
    if is_digits(s, 4) {
        return NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1)?.and_hms_opt(0, 0, 0);
    }
    if let Some((year, month)) = s.split_once('-') {
        if is_digits(year, 4) && is_digits(month, 2) {
            return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?
                .and_hms_opt(0, 0, 0);
        }
    }

    // Date-times with an offset ("Z", "+02", "+02:00"), with or without seconds
    let zoned = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(rest) => format!("{}+00:00", rest),
        None => s.to_string(),
    };
    for fmt in ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%d %H:%M%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
            return Some(dt.naive_utc());
        }
    }

    // RFC 3339 / ISO 8601 with offset, then RFC 2822
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }

    None
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
