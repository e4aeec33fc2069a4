//! Lenient calendar-date parsing.
//!
//! Accepts the date layouts seen in catalog exports (ISO, slash and dot
//! separated, month names, Steam's `1 Nov, 2000`) plus datetimes, whose time
//! part is dropped, and partial `YYYY-MM` / `YYYY` values, which resolve to
//! the first day of the period.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 9] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 15] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %b, %Y", // 1 Nov, 2000
    "%d %B, %Y", // 1 November, 2000
    "%b %d, %Y", // Nov 1, 2000
    "%B %d, %Y", // November 1, 2000
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%Y-%b-%d",
];

/// Parses a date string, returning `None` when no known layout matches.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_date(trimmed)
        .or_else(|| try_parse_datetime(trimmed).map(|dt| dt.date()))
        .or_else(|| try_parse_partial(trimmed))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn try_parse_partial(value: &str) -> Option<NaiveDate> {
    // YYYY-MM
    if value.len() == 7 && value.as_bytes()[4] == b'-' {
        let year = value[0..4].parse::<i32>().ok()?;
        let month = value[5..7].parse::<u32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    // YYYY
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        let year = value.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}
