//! Timestamp and calendar-date helpers.
//!
//! Rows store UTC as `YYYY-MM-DD HH:MM:SS`, the format SQLite's
//! `CURRENT_TIMESTAMP` produces, so stored text sorts chronologically.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

/// Storage format for UTC timestamps.
pub const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static CALENDAR_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

#[must_use]
pub fn format_sql_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(SQL_TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored or client-supplied timestamp.
///
/// Accepts RFC 3339 with an offset, naive `YYYY-MM-DD HH:MM:SS[.fff][Z]`
/// (space or `T` separator, read as UTC) and bare `YYYY-MM-DD` (UTC midnight).
/// The space-plus-`Z` shape appears in rows written by older clients that
/// only swapped the `T` of an ISO string for a space.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.fZ",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    parse_calendar_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|n| n.and_utc())
}

/// Strict `YYYY-MM-DD` path/query parameter.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if !CALENDAR_DATE.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
