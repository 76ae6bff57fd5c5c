//! Date normalization for editable controls and overdue checks.
//!
//! Host timestamps arrive as loosely formatted strings (RFC 3339 from
//! serialized dates, bare `yyyy-mm-dd` values from date controls, or
//! occasionally epoch milliseconds in custom fields). Everything here is
//! total: unparsable input degrades to "no date" instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use mockable::Clock;
use serde_json::Value;

/// `strftime` pattern used by interactive date controls.
pub const EDITABLE_DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a timestamp-like string into an instant.
///
/// Accepts RFC 3339, RFC 2822, naive ISO date-times (read as UTC) and bare
/// dates (midnight UTC). Returns `None` for empty or unrecognised input.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, EDITABLE_DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Formats a timestamp-like value for an interactive date control.
///
/// Absent or unparsable values produce the empty string.
///
/// # Examples
///
/// ```
/// use kanbn_task_editor::editor::domain::to_editable_date;
///
/// assert_eq!(to_editable_date(Some("2024-03-05T17:30:00.000Z")), "2024-03-05");
/// assert_eq!(to_editable_date(Some("2024-03-05")), "2024-03-05");
/// assert_eq!(to_editable_date(None), "");
/// ```
#[must_use]
pub fn to_editable_date(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|instant| instant.format(EDITABLE_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Formats a loosely typed JSON value for an interactive date control.
///
/// Strings are parsed as timestamps and integers as epoch milliseconds;
/// anything else produces the empty string.
#[must_use]
pub fn editable_date_from_value(value: &Value) -> String {
    match value {
        Value::String(text) => to_editable_date(Some(text.as_str())),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|instant| instant.format(EDITABLE_DATE_FORMAT).to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Returns `true` iff `due` is present and parses to an instant strictly
/// before `now`.
#[must_use]
pub fn is_overdue(due: Option<&str>, now: DateTime<Utc>) -> bool {
    due.and_then(parse_timestamp)
        .is_some_and(|instant| instant < now)
}

/// Overdue check against the current instant of `clock`.
#[must_use]
pub fn is_overdue_at(due: Option<&str>, clock: &impl Clock) -> bool {
    is_overdue(due, clock.utc())
}

/// Serializes an instant the way the host serializes dates.
#[must_use]
pub fn host_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
