//! REST endpoint paths and JSON bodies.
//!
//! All endpoints live under the page's own origin and take `POST` with a JSON
//! body. Response fields that the backend omits on some paths are optional
//! here so a sparse body still decodes.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::{Deserialize, Serialize};

/// Backend endpoints the clients talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    SendOtp,
    VerifyOtp,
    Chat,
    Query,
    ConnectAgent,
    SummarizeChat,
    CheckAgentMessages,
}

impl Endpoint {
    /// Absolute path of the endpoint on the backend origin.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::SendOtp => "/send_otp",
            Self::VerifyOtp => "/verify_otp",
            Self::Chat => "/chat",
            Self::Query => "/query",
            Self::ConnectAgent => "/connect_agent",
            Self::SummarizeChat => "/summarize_chat",
            Self::CheckAgentMessages => "/check_agent_messages",
        }
    }

    /// Join the endpoint path onto `base` (an origin or path prefix, may be empty).
    #[must_use]
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOtpRequest {
    pub account_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOtpResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub otp: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// History entry as folded into a `/chat` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub sender: String,
    pub content: String,
}

/// History entry as sent to the transcript endpoints (`/connect_agent`,
/// `/summarize_chat`); agent entries keep their timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptItem {
    pub sender: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub chat_history: Vec<HistoryItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub needs_agent: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub account_id: String,
    pub query_type: String,
}

/// `/query` answers `{status, reply}` on success and `{status, message}` otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl QueryResponse {
    /// Text to show for this response: the reply, else the message.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.reply.as_deref().or(self.message.as_deref())
    }

    /// A missing `status` counts as success; anything but `"success"` is a failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref().map_or(true, |status| status == "success")
    }
}

/// Body of `/connect_agent` and `/summarize_chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRequest {
    pub chat_history: Vec<TranscriptItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAgentMessagesRequest {
    pub customer_id: String,
    pub last_check_time: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub message_text: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessagesResponse {
    #[serde(default)]
    pub messages: Vec<AgentMessage>,
}
