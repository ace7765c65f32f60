//! Socket.IO client for the live-agent channel.
//!
//! Runs as its own task: connects, answers the handshake and heartbeats,
//! forwards `new_message` events and (re)connects to the event loop as
//! session messages, and reconnects with exponential backoff.

use std::time::Duration;

use conversation::Msg;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use wire::realtime::{INITIAL_BACKOFF_MS, Reaction, ServerEvent, may_send_before_connect, next_backoff, react};
use wire::socketio::{self, Packet};

use crate::error::CliError;

/// Handle for queueing outgoing packets; a disabled handle drops them.
#[derive(Debug, Clone, Default)]
pub struct SocketHandle {
    tx: Option<UnboundedSender<String>>,
}

impl SocketHandle {
    pub fn send(&self, packet: &Packet) -> bool {
        self.tx.as_ref().is_some_and(|tx| tx.send(socketio::encode(packet)).is_ok())
    }
}

pub fn spawn_socket(url: String, events: UnboundedSender<Msg>) -> SocketHandle {
    let (tx, rx) = unbounded_channel();
    tokio::spawn(socket_loop(url, events, tx.clone(), rx));
    SocketHandle { tx: Some(tx) }
}

async fn socket_loop(
    url: String,
    events: UnboundedSender<Msg>,
    tx: UnboundedSender<String>,
    mut rx: UnboundedReceiver<String>,
) {
    let mut backoff_ms = INITIAL_BACKOFF_MS;
    loop {
        match connect_and_run(&url, &events, &tx, &mut rx).await {
            Ok(true) => {
                tracing::info!("live-agent socket closed");
                backoff_ms = INITIAL_BACKOFF_MS;
            }
            Ok(false) => tracing::warn!("live-agent socket closed before connecting"),
            Err(error) => tracing::warn!(error = %error, "live-agent socket error"),
        }
        if events.is_closed() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        backoff_ms = next_backoff(backoff_ms);
    }
}

/// Run one connection until either side closes.
///
/// Returns whether the namespace connect was acknowledged.
async fn connect_and_run(
    url: &str,
    events: &UnboundedSender<Msg>,
    tx: &UnboundedSender<String>,
    rx: &mut UnboundedReceiver<String>,
) -> Result<bool, CliError> {
    let (stream, _) = connect_async(url).await?;
    let (mut write, mut read) = stream.split();
    let mut connected = false;
    tracing::debug!(%url, "socket opened");

    loop {
        tokio::select! {
            outgoing = rx.recv() => {
                let Some(text) = outgoing else {
                    return Ok(connected);
                };
                if !connected && !may_send_before_connect(&text) {
                    tracing::debug!(packet = %text, "socket not connected, dropping");
                    continue;
                }
                write.send(Message::Text(text.into())).await?;
            }
            incoming = read.next() => {
                let Some(message) = incoming else {
                    return Ok(connected);
                };
                let text = match message? {
                    Message::Text(text) => text.as_str().to_owned(),
                    Message::Close(_) => return Ok(connected),
                    _ => continue,
                };
                let packet = match socketio::decode(&text) {
                    Ok(packet) => packet,
                    Err(error) => {
                        tracing::warn!(error = %error, "undecodable socket packet");
                        continue;
                    }
                };
                match react(&packet) {
                    Reaction::Reply(reply) => {
                        let _ = tx.send(socketio::encode(&reply));
                    }
                    Reaction::Connected => {
                        connected = true;
                        let _ = events.send(Msg::SocketConnected);
                    }
                    Reaction::Deliver(ServerEvent::NewMessage(message)) => {
                        let _ = events.send(Msg::Pushed(message));
                    }
                    Reaction::Close => return Ok(connected),
                    Reaction::Ignore => {}
                }
            }
        }
    }
}
