//! Network layer: REST calls and the live-agent socket.

pub mod api;
pub mod socket;
