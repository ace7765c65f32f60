use super::*;

#[test]
fn formats_rfc3339_timestamp() {
    assert_eq!(format_hhmm("2024-05-01T09:05:00Z").as_deref(), Some("09:05"));
    assert_eq!(format_hhmm("2024-05-01T21:45:12+05:30").as_deref(), Some("21:45"));
}

#[test]
fn formats_offsetless_iso_timestamp() {
    assert_eq!(format_hhmm("2024-05-01T10:15:00").as_deref(), Some("10:15"));
    assert_eq!(format_hhmm("2024-05-01T10:15:00.123456").as_deref(), Some("10:15"));
}

#[test]
fn formats_space_separated_timestamp() {
    assert_eq!(format_hhmm("2024-05-01 23:59:59").as_deref(), Some("23:59"));
}

#[test]
fn rejects_garbage() {
    assert_eq!(format_hhmm("yesterday"), None);
    assert_eq!(format_hhmm(""), None);
}
