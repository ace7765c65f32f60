//! Credential persistence for the terminal client.
//!
//! Credentials live in a small JSON file so a verified session survives
//! restarts the way the browser keeps them in `localStorage`.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::io::ErrorKind;
use std::path::PathBuf;

use conversation::Credentials;

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the stored credentials; a missing file means a fresh session.
    pub fn load(&self) -> Result<Credentials, CliError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Credentials::default()),
            Ok(raw) => {
                let stored: Credentials = serde_json::from_str(&raw)?;
                // Same cleanup rules as the browser's raw keys.
                let (authenticated, customer_id) = stored.stored_values();
                Ok(Credentials::from_stored(Some(authenticated), customer_id))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Credentials::default()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    pub fn save(&self, credentials: &Credentials) -> Result<(), CliError> {
        let rendered = serde_json::to_string_pretty(credentials)?;
        std::fs::write(&self.path, rendered).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> CliError {
        CliError::StateFile { path: self.path.display().to_string(), source }
    }
}
