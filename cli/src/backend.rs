//! REST calls against the assistant backend.
//!
//! The client keeps a cookie store: `/verify_otp` only carries the code, so
//! the server ties it to the account through its session cookie.

use conversation::{Msg, Request};
use serde_json::Value;
use wire::{Endpoint, RequestError};

use crate::clock;
use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct Backend {
    client: reqwest::Client,
    base_url: String,
}

impl Backend {
    pub fn new(base_url: &str) -> Result<Self, CliError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// Execute one request and wrap the result as a session message.
    pub async fn perform(&self, request: Request) -> Msg {
        let endpoint = request.endpoint();
        match request {
            Request::SendOtp(body) => Msg::OtpSent(self.post_json(endpoint, &body).await),
            Request::VerifyOtp(body) => Msg::OtpVerified(self.post_json(endpoint, &body).await),
            Request::Chat(body) => Msg::ChatReplied(self.post_json(endpoint, &body).await),
            Request::Query(body) => Msg::QueryAnswered(self.post_json(endpoint, &body).await),
            Request::ConnectAgent(body) => Msg::AgentConnected(self.post_ack(endpoint, &body).await),
            Request::SummarizeChat(body) => Msg::SummaryLogged(self.post_ack(endpoint, &body).await),
            Request::CheckAgentMessages(body) => {
                let result = self.post_json(endpoint, &body).await;
                Msg::AgentMessagesFetched { result, checked_at: clock::now_iso() }
            }
        }
    }

    async fn post_json<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R, RequestError>
    where
        B: serde::Serialize,
        R: serde::de::DeserializeOwned,
    {
        let response = self.send(endpoint, body).await?;
        let value = response.json::<Value>().await.map_err(|error| {
            tracing::warn!(endpoint = endpoint.path(), error = %error, "response body unreadable");
            RequestError::Decode(error.to_string())
        })?;
        serde_json::from_value(value).map_err(|error| {
            tracing::warn!(endpoint = endpoint.path(), error = %error, "unexpected response shape");
            RequestError::Decode(error.to_string())
        })
    }

    async fn post_ack<B: serde::Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<(), RequestError> {
        self.send(endpoint, body).await.map(|_| ())
    }

    async fn send<B: serde::Serialize>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<reqwest::Response, RequestError> {
        let url = endpoint.url(&self.base_url);
        tracing::debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await.map_err(|error| {
            tracing::warn!(endpoint = endpoint.path(), error = %error, "request failed");
            RequestError::Network(error.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint = endpoint.path(), status = status.as_u16(), "request rejected");
            return Err(RequestError::from_status(status.as_u16(), &text));
        }
        Ok(response)
    }
}
