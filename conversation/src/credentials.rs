//! Session credentials persisted across reloads.
//!
//! The browser stores two raw string keys; the terminal client stores the
//! same struct as JSON. Both go through [`Credentials::from_stored`] so the
//! parsing rules stay identical.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use serde::{Deserialize, Serialize};

/// Storage key holding `"true"` once OTP verification succeeded.
pub const AUTHENTICATED_KEY: &str = "authenticated";
/// Storage key holding the verified customer ID.
pub const CUSTOMER_ID_KEY: &str = "customer_id";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub customer_id: Option<String>,
}

impl Credentials {
    #[must_use]
    pub fn verified(customer_id: Option<String>) -> Self {
        Self { authenticated: true, customer_id: customer_id.filter(|id| !id.trim().is_empty()) }
    }

    /// Parse the raw values read from storage.
    #[must_use]
    pub fn from_stored(authenticated: Option<&str>, customer_id: Option<&str>) -> Self {
        Self {
            authenticated: authenticated == Some("true"),
            customer_id: customer_id
                .map(str::trim)
                .filter(|id| !id.is_empty() && *id != "undefined" && *id != "null")
                .map(ToOwned::to_owned),
        }
    }

    /// Raw values to write back to storage; `None` means remove the key.
    #[must_use]
    pub fn stored_values(&self) -> (&'static str, Option<&str>) {
        let authenticated = if self.authenticated { "true" } else { "false" };
        (authenticated, self.customer_id.as_deref())
    }

    /// Agent-message polling runs only while both values are present.
    #[must_use]
    pub fn can_poll(&self) -> bool {
        self.authenticated && self.customer_id.is_some()
    }
}
