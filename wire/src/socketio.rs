//! Socket.IO v4 text packet codec.
//!
//! The live-agent channel is a Socket.IO server. Over a raw WebSocket each
//! text message is one Engine.IO packet (`0` open, `2` ping, `3` pong, `4`
//! message, ...) and Engine.IO messages carry one Socket.IO packet (`0`
//! connect, `2` event, ...). Only the text encoding is supported; binary
//! attachments are never used by this channel.
//!
//! ```text
//! 0{"sid":"abc","pingInterval":25000,...}   open
//! 2                                           ping (server -> client)
//! 3                                           pong
//! 40                                          connect to "/"
//! 42["new_message",{"sender":"agent",...}]    event on "/"
//! 42/support,7["join",{}]                     event on "/support" with ack id 7
//! ```

#[cfg(test)]
#[path = "socketio_test.rs"]
mod socketio_test;

use serde::Deserialize;
use serde_json::Value;

/// Default Socket.IO handshake path.
pub const DEFAULT_PATH: &str = "/socket.io/";

/// Error returned by [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("empty packet")]
    Empty,
    #[error("unknown engine.io packet type: {0:?}")]
    UnknownEngineType(char),
    #[error("unknown socket.io packet type: {0:?}")]
    UnknownSocketType(char),
    #[error("invalid packet payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("event payload must be an array starting with the event name")]
    MalformedEvent,
}

/// Engine.IO open handshake payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

/// One decoded packet.
#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Noop,
    Connect { namespace: String, data: Option<Value> },
    Disconnect { namespace: String },
    Event { namespace: String, ack: Option<u64>, name: String, args: Vec<Value> },
    Ack { namespace: String, id: u64, args: Vec<Value> },
    ConnectError { namespace: String, data: Option<Value> },
}

impl Packet {
    /// Connect packet for the default namespace.
    #[must_use]
    pub fn connect() -> Self {
        Self::Connect { namespace: "/".to_owned(), data: None }
    }

    /// Event packet on the default namespace with a single JSON argument.
    #[must_use]
    pub fn event(name: &str, payload: Value) -> Self {
        Self::Event { namespace: "/".to_owned(), ack: None, name: name.to_owned(), args: vec![payload] }
    }
}

/// Encode a packet into its wire text.
#[must_use]
pub fn encode(packet: &Packet) -> String {
    match packet {
        Packet::Open(_) => "0".to_owned(),
        Packet::Close => "1".to_owned(),
        Packet::Ping => "2".to_owned(),
        Packet::Pong => "3".to_owned(),
        Packet::Noop => "6".to_owned(),
        Packet::Connect { namespace, data } => {
            socket_packet('0', namespace, None, data.as_ref().map(Value::to_string))
        }
        Packet::Disconnect { namespace } => socket_packet('1', namespace, None, None),
        Packet::Event { namespace, ack, name, args } => {
            let mut items = Vec::with_capacity(args.len() + 1);
            items.push(Value::String(name.clone()));
            items.extend(args.iter().cloned());
            socket_packet('2', namespace, *ack, Some(Value::Array(items).to_string()))
        }
        Packet::Ack { namespace, id, args } => {
            socket_packet('3', namespace, Some(*id), Some(Value::Array(args.clone()).to_string()))
        }
        Packet::ConnectError { namespace, data } => {
            socket_packet('4', namespace, None, data.as_ref().map(Value::to_string))
        }
    }
}

fn socket_packet(kind: char, namespace: &str, ack: Option<u64>, payload: Option<String>) -> String {
    let mut out = String::from("4");
    out.push(kind);
    if namespace != "/" && !namespace.is_empty() {
        out.push_str(namespace);
        out.push(',');
    }
    if let Some(id) = ack {
        out.push_str(&id.to_string());
    }
    if let Some(payload) = payload {
        out.push_str(&payload);
    }
    out
}

/// Decode one wire text message into a packet.
///
/// # Errors
///
/// Returns a [`CodecError`] for empty input, unknown packet type digits,
/// malformed JSON payloads, or event payloads that are not `[name, ...]`.
pub fn decode(text: &str) -> Result<Packet, CodecError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(CodecError::Empty)?;
    let rest = chars.as_str();
    match kind {
        '0' => Ok(Packet::Open(serde_json::from_str(rest)?)),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_socket(rest),
        '6' => Ok(Packet::Noop),
        other => Err(CodecError::UnknownEngineType(other)),
    }
}

fn decode_socket(text: &str) -> Result<Packet, CodecError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(CodecError::Empty)?;
    let mut rest = chars.as_str();

    let mut namespace = "/".to_owned();
    if rest.starts_with('/') {
        let end = rest.find(',').unwrap_or(rest.len());
        namespace = rest[..end].to_owned();
        rest = rest.get(end + 1..).unwrap_or("");
    }

    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    let ack = if digits > 0 { rest[..digits].parse::<u64>().ok() } else { None };
    rest = &rest[digits..];

    let payload = if rest.is_empty() { None } else { Some(serde_json::from_str::<Value>(rest)?) };

    match kind {
        '0' => Ok(Packet::Connect { namespace, data: payload }),
        '1' => Ok(Packet::Disconnect { namespace }),
        '2' => {
            let Some(Value::Array(mut items)) = payload else {
                return Err(CodecError::MalformedEvent);
            };
            if items.is_empty() {
                return Err(CodecError::MalformedEvent);
            }
            let Value::String(name) = items.remove(0) else {
                return Err(CodecError::MalformedEvent);
            };
            Ok(Packet::Event { namespace, ack, name, args: items })
        }
        '3' => {
            let args = match payload {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            Ok(Packet::Ack { namespace, id: ack.unwrap_or_default(), args })
        }
        '4' => Ok(Packet::ConnectError { namespace, data: payload }),
        other => Err(CodecError::UnknownSocketType(other)),
    }
}

/// Build the WebSocket URL of a Socket.IO server from an HTTP(S) origin.
///
/// Returns `None` when `origin` is not an `http://` or `https://` URL.
#[must_use]
pub fn websocket_url(origin: &str, path: &str) -> Option<String> {
    let origin = origin.trim_end_matches('/');
    let (scheme, rest) = if let Some(rest) = origin.strip_prefix("http://") {
        ("ws", rest)
    } else if let Some(rest) = origin.strip_prefix("https://") {
        ("wss", rest)
    } else {
        return None;
    };
    let path = if path.ends_with('/') { path.to_owned() } else { format!("{path}/") };
    Some(format!("{scheme}://{rest}{path}?EIO=4&transport=websocket"))
}
