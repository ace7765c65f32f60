//! Display formatting for server timestamps.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, Time};

/// Format a server timestamp as `HH:MM`.
///
/// Accepts RFC 3339 (`2024-05-01T10:15:00Z`), offset-less ISO 8601
/// (`2024-05-01T10:15:00.123456`) and the space-separated form
/// (`2024-05-01 10:15:00`). The wall-clock time is shown as sent; no
/// timezone conversion is applied.
#[must_use]
pub fn format_hhmm(timestamp: &str) -> Option<String> {
    let time = parse_time_of_day(timestamp.trim())?;
    Some(format!("{:02}:{:02}", time.hour(), time.minute()))
}

fn parse_time_of_day(raw: &str) -> Option<Time> {
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(dt.time());
    }
    if let Ok(dt) = PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT) {
        return Some(dt.time());
    }
    let spaced = format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]");
    PrimitiveDateTime::parse(raw, spaced).ok().map(PrimitiveDateTime::time)
}
