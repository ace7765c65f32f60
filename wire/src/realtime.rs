//! Live-agent channel events carried over Socket.IO.

#[cfg(test)]
#[path = "realtime_test.rs"]
mod realtime_test;

use serde::{Deserialize, Serialize};

use crate::socketio::Packet;

/// Client -> server: subscribe to the customer's private room.
pub const JOIN_CUSTOMER_ROOM: &str = "join_customer_room";
/// Server -> client: a message was posted to the customer's room.
pub const NEW_MESSAGE: &str = "new_message";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinCustomerRoom {
    pub customer_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub sender: String,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl NewMessage {
    /// Whether the message was written by a human agent.
    #[must_use]
    pub fn is_from_agent(&self) -> bool {
        self.sender == "agent"
    }
}

/// Events the client understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerEvent {
    NewMessage(NewMessage),
}

impl ServerEvent {
    /// Interpret a decoded packet; anything other than a known event is `None`.
    #[must_use]
    pub fn from_packet(packet: &Packet) -> Option<Self> {
        let Packet::Event { name, args, .. } = packet else {
            return None;
        };
        match name.as_str() {
            NEW_MESSAGE => {
                let payload = args.first()?.clone();
                serde_json::from_value(payload).ok().map(Self::NewMessage)
            }
            _ => None,
        }
    }
}

/// Build the `join_customer_room` event packet.
#[must_use]
pub fn join_customer_room(customer_id: &str) -> Packet {
    let payload = JoinCustomerRoom { customer_id: customer_id.to_owned() };
    Packet::event(
        JOIN_CUSTOMER_ROOM,
        serde_json::to_value(payload).unwrap_or(serde_json::Value::Null),
    )
}

/// First reconnect delay after a dropped connection.
pub const INITIAL_BACKOFF_MS: u64 = 1000;
/// Reconnect delays double up to this cap.
pub const MAX_BACKOFF_MS: u64 = 10_000;

#[must_use]
pub fn next_backoff(current_ms: u64) -> u64 {
    current_ms.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// What a client loop does with one decoded packet.
#[derive(Clone, Debug, PartialEq)]
pub enum Reaction {
    /// Write this packet back (handshake connect, heartbeat pong).
    Reply(Packet),
    /// The namespace connect was acknowledged.
    Connected,
    Deliver(ServerEvent),
    /// The server ended the session; drop the connection.
    Close,
    Ignore,
}

#[must_use]
pub fn react(packet: &Packet) -> Reaction {
    match packet {
        Packet::Open(_) => Reaction::Reply(Packet::connect()),
        Packet::Ping => Reaction::Reply(Packet::Pong),
        Packet::Connect { .. } => Reaction::Connected,
        Packet::Event { .. } => ServerEvent::from_packet(packet).map_or(Reaction::Ignore, Reaction::Deliver),
        Packet::Close | Packet::Disconnect { .. } | Packet::ConnectError { .. } => Reaction::Close,
        Packet::Pong | Packet::Noop | Packet::Ack { .. } => Reaction::Ignore,
    }
}

/// Events are only meaningful once the namespace connect was acknowledged;
/// handshake and heartbeat packets may go out earlier.
#[must_use]
pub fn may_send_before_connect(encoded: &str) -> bool {
    !encoded.starts_with("42")
}
