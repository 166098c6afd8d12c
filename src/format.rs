//! Human-readable rendering of event dates for the `list` command.
//!
//! The canonical model keeps dates as verbatim source strings; parsing only
//! happens here, at display time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const INVALID_DATE: &str = "Invalid Date";
pub const DATE_TBA: &str = "Date TBA";

const DATE_FORMAT: &str = "%A %-d %B %Y";
const TIME_FORMAT: &str = "%-I:%M %p";

/// Parsed date plus whether the source carried a time of day.
fn parse(raw: &str) -> Option<(NaiveDateTime, bool)> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some((dt.naive_local(), true));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some((dt, true));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| (dt, false))
}

/// `"2025-11-15T19:00:00Z"` becomes `"Saturday 15 November 2025"`.
///
/// Dates are shown in the offset they were written in.
pub fn format_event_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return DATE_TBA.to_string();
    }
    match parse(raw) {
        Some((dt, _)) => dt.format(DATE_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Time of day, when the source string has one.
pub fn format_event_time(raw: &str) -> Option<String> {
    match parse(raw) {
        Some((dt, true)) => Some(dt.format(TIME_FORMAT).to_string()),
        _ => None,
    }
}
