//! Credential persistence in `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host page shares these raw keys with other scripts, so values are
//! stored as plain strings rather than JSON. Parsing lives in
//! [`Credentials::from_stored`].

use conversation::Credentials;
#[cfg(feature = "csr")]
use conversation::credentials::{AUTHENTICATED_KEY, CUSTOMER_ID_KEY};

/// Read the stored credentials; missing storage yields the default.
pub fn load_credentials() -> Credentials {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = local_storage() else {
            return Credentials::default();
        };
        let authenticated = storage.get_item(AUTHENTICATED_KEY).ok().flatten();
        let customer_id = storage.get_item(CUSTOMER_ID_KEY).ok().flatten();
        Credentials::from_stored(authenticated.as_deref(), customer_id.as_deref())
    }
    #[cfg(not(feature = "csr"))]
    {
        Credentials::default()
    }
}

/// Write credentials back; a missing customer ID removes its key.
pub fn save_credentials(credentials: &Credentials) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = local_storage() else {
            log::warn!("localStorage unavailable, credentials not saved");
            return;
        };
        let (authenticated, customer_id) = credentials.stored_values();
        let _ = storage.set_item(AUTHENTICATED_KEY, authenticated);
        let _ = match customer_id {
            Some(id) => storage.set_item(CUSTOMER_ID_KEY, id),
            None => storage.remove_item(CUSTOMER_ID_KEY),
        };
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = credentials;
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}
