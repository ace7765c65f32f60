//! Shared wire schema for the assistant backend.
//!
//! This crate owns the JSON bodies exchanged with the REST endpoints, the
//! transport error surfaced by every client, and the Socket.IO text packet
//! codec used for the live-agent channel. It performs no I/O so both the
//! browser widget and the terminal client can depend on it.

pub mod error;
pub mod http;
pub mod realtime;
pub mod socketio;

pub use error::RequestError;
pub use http::Endpoint;
