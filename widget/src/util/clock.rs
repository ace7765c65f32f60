//! Browser clock.

/// Current time as an ISO 8601 UTC string (`Date.prototype.toISOString`).
pub fn now_iso() -> String {
    #[cfg(feature = "csr")]
    {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        String::new()
    }
}
