//! REST API helpers for the assistant backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Host builds: every call fails with [`RequestError::Network`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, RequestError>`; the session turns failures
//! into bot messages, so nothing here panics or retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use wire::http::{
    AgentMessagesResponse, ChatRequest, ChatResponse, CheckAgentMessagesRequest, QueryRequest, QueryResponse,
    SendOtpRequest, SendOtpResponse, TranscriptRequest, VerifyOtpRequest, VerifyOtpResponse,
};
use wire::{Endpoint, RequestError};

#[cfg(any(test, not(feature = "csr")))]
fn unavailable() -> RequestError {
    RequestError::Network("not available outside the browser".to_owned())
}

/// POST `body` as JSON and decode a JSON response.
async fn post_json<B, R>(base: &str, endpoint: Endpoint, body: &B) -> Result<R, RequestError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    #[cfg(feature = "csr")]
    {
        let resp = send(base, endpoint, body).await?;
        resp.json::<R>().await.map_err(|e| {
            log::warn!("{}: undecodable response: {e}", endpoint.path());
            RequestError::Decode(e.to_string())
        })
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, endpoint, body);
        Err(unavailable())
    }
}

/// POST `body` as JSON and ignore the response body.
async fn post_ack<B: Serialize>(base: &str, endpoint: Endpoint, body: &B) -> Result<(), RequestError> {
    #[cfg(feature = "csr")]
    {
        send(base, endpoint, body).await.map(|_| ())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, endpoint, body);
        Err(unavailable())
    }
}

#[cfg(feature = "csr")]
async fn send<B: Serialize>(
    base: &str,
    endpoint: Endpoint,
    body: &B,
) -> Result<gloo_net::http::Response, RequestError> {
    let url = endpoint.url(base);
    let resp = gloo_net::http::Request::post(&url)
        .json(body)
        .map_err(|e| RequestError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| {
            log::warn!("{url}: request failed: {e}");
            RequestError::Network(e.to_string())
        })?;
    if !resp.ok() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        log::warn!("{url}: status {status}");
        return Err(RequestError::from_status(status, &text));
    }
    Ok(resp)
}

pub async fn send_otp(base: &str, body: &SendOtpRequest) -> Result<SendOtpResponse, RequestError> {
    post_json(base, Endpoint::SendOtp, body).await
}

pub async fn verify_otp(base: &str, body: &VerifyOtpRequest) -> Result<VerifyOtpResponse, RequestError> {
    post_json(base, Endpoint::VerifyOtp, body).await
}

pub async fn chat(base: &str, body: &ChatRequest) -> Result<ChatResponse, RequestError> {
    post_json(base, Endpoint::Chat, body).await
}

pub async fn query(base: &str, body: &QueryRequest) -> Result<QueryResponse, RequestError> {
    post_json(base, Endpoint::Query, body).await
}

pub async fn connect_agent(base: &str, body: &TranscriptRequest) -> Result<(), RequestError> {
    post_ack(base, Endpoint::ConnectAgent, body).await
}

pub async fn summarize_chat(base: &str, body: &TranscriptRequest) -> Result<(), RequestError> {
    post_ack(base, Endpoint::SummarizeChat, body).await
}

pub async fn check_agent_messages(
    base: &str,
    body: &CheckAgentMessagesRequest,
) -> Result<AgentMessagesResponse, RequestError> {
    post_json(base, Endpoint::CheckAgentMessages, body).await
}
