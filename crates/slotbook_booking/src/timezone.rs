//! Rendering of slot timestamps in a chosen time zone.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Zones offered next to the configured one.
pub const COMMON_TIMEZONES: [&str; 7] = [
    "UTC",
    "America/New_York",
    "Europe/London",
    "Europe/Paris",
    "Asia/Kolkata",
    "Asia/Tokyo",
    "Australia/Sydney",
];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO 8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Formats `slot` as `YYYY-MM-DD HH:MM (ABBR)` in `time_zone`.
///
/// Falls back to `slot` unchanged when either the zone or the timestamp is not understood.
pub fn format_slot(slot: &str, time_zone: &str) -> String {
    let Ok(tz) = time_zone.parse::<Tz>() else {
        return slot.to_string();
    };
    match parse_timestamp(slot) {
        Some(dt) => dt.with_timezone(&tz).format("%Y-%m-%d %H:%M (%Z)").to_string(),
        None => slot.to_string(),
    }
}

/// `preferred` followed by [`COMMON_TIMEZONES`], without repeats.
pub fn timezone_choices(preferred: &str) -> Vec<String> {
    let mut choices: Vec<String> = Vec::with_capacity(COMMON_TIMEZONES.len() + 1);
    for zone in std::iter::once(preferred).chain(COMMON_TIMEZONES) {
        if !choices.iter().any(|existing| existing == zone) {
            choices.push(zone.to_string());
        }
    }
    choices
}
