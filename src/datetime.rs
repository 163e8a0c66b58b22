//! Date/time utilities for StudyLog.
//!
//! The application backend serializes `LocalDateTime` values without an
//! offset, the user directory uses RFC3339. Both are accepted; naive values
//! are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Parse a timestamp as served by either backend.
pub fn parse_timestamp(datetime_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(datetime_str, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(datetime_str, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp string in the given timezone.
///
/// Returns the original string if it cannot be parsed, and formats in UTC
/// if the timezone name is unknown.
pub fn format_datetime(datetime_str: &str, timezone: &str, format: &str) -> String {
    let Some(utc) = parse_timestamp(datetime_str) else {
        return datetime_str.to_string();
    };

    match timezone.parse::<Tz>() {
        Ok(tz) => utc.with_timezone(&tz).format(format).to_string(),
        Err(_) => utc.format(format).to_string(),
    }
}

/// Format a timestamp as a date (`YYYY-MM-DD`).
pub fn format_date(datetime_str: &str, timezone: &str) -> String {
    format_datetime(datetime_str, timezone, "%Y-%m-%d")
}
