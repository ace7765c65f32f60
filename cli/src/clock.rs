#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use time::OffsetDateTime;
use time::macros::format_description;

/// Current UTC time in the browser's `toISOString` shape.
pub fn now_iso() -> String {
    format_iso(OffsetDateTime::now_utc())
}

fn format_iso(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    at.format(format).unwrap_or_default()
}
