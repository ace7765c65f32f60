//! Transport error shared by the browser and terminal HTTP clients.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Error returned by every backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The request never produced a response (connection refused, CORS, offline).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("server returned {code}")]
    Status {
        code: u16,
        /// `message` field of the error body, when the server sent one.
        message: Option<String>,
    },
    /// The response body could not be decoded into the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl RequestError {
    /// Build a [`RequestError::Status`] from a status code and a raw body.
    ///
    /// The body is inspected for a string `message` field; any other shape
    /// yields `message: None`.
    #[must_use]
    pub fn from_status(code: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(ToOwned::to_owned));
        Self::Status { code, message }
    }

    /// Server-provided message, if this is a status error that carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the server was reached at all.
    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}
