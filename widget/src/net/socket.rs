//! Socket.IO client for the live-agent channel.
//!
//! The socket loop owns the WebSocket lifecycle: Engine.IO handshake,
//! namespace connect, ping/pong, and reconnection with exponential backoff.
//! Incoming `new_message` events and (re)connects are handed to the
//! [`Controller`](crate::runtime::Controller) as session messages; outgoing
//! packets go through a [`SocketSender`] channel.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "csr")]` since it
//! requires a browser environment.
//!
//! ERROR HANDLING
//! ==============
//! Transport and decode failures are logged and end the current connection;
//! the reconnect loop brings the channel back. Polling keeps delivering
//! agent messages in the meantime.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use wire::socketio::Packet;

#[cfg(feature = "csr")]
use crate::runtime::Controller;

/// Handle for queueing outgoing packets on the live socket.
///
/// The default sender is disconnected and drops everything.
#[derive(Clone, Debug, Default)]
pub struct SocketSender {
    #[cfg(feature = "csr")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
}

impl SocketSender {
    /// Queue a packet; returns `false` when the socket loop is gone.
    pub fn send(&self, packet: &Packet) -> bool {
        #[cfg(feature = "csr")]
        {
            self.tx
                .as_ref()
                .is_some_and(|tx| tx.unbounded_send(wire::socketio::encode(packet)).is_ok())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = packet;
            false
        }
    }
}

/// Spawn the socket lifecycle as a local async task.
#[cfg(feature = "csr")]
pub fn spawn_socket(url: String, controller: Controller) -> SocketSender {
    let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
    leptos::task::spawn_local(socket_loop(url, controller, tx.clone(), rx));
    SocketSender { tx: Some(tx) }
}

#[cfg(feature = "csr")]
async fn socket_loop(
    url: String,
    controller: Controller,
    tx: futures::channel::mpsc::UnboundedSender<String>,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wire::realtime::{INITIAL_BACKOFF_MS, next_backoff};

    let rx = Rc::new(RefCell::new(rx));
    let mut backoff_ms = INITIAL_BACKOFF_MS;

    loop {
        match connect_and_run(&url, controller, &tx, &rx).await {
            Ok(true) => {
                log::info!("live-agent socket closed");
                backoff_ms = INITIAL_BACKOFF_MS;
            }
            Ok(false) => log::warn!("live-agent socket closed before connecting"),
            Err(e) => log::warn!("live-agent socket error: {e}"),
        }

        gloo_timers::future::sleep(std::time::Duration::from_millis(backoff_ms)).await;
        backoff_ms = next_backoff(backoff_ms);
    }
}

/// Run one connection until either side closes.
///
/// Returns whether the namespace connect was acknowledged.
#[cfg(feature = "csr")]
async fn connect_and_run(
    url: &str,
    controller: Controller,
    tx: &futures::channel::mpsc::UnboundedSender<String>,
    rx: &std::rc::Rc<std::cell::RefCell<futures::channel::mpsc::UnboundedReceiver<String>>>,
) -> Result<bool, String> {
    use std::cell::Cell;

    use conversation::Msg;
    use futures::StreamExt;
    use wire::realtime::{Reaction, ServerEvent, may_send_before_connect, react};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();
    let connected = Cell::new(false);

    let mut rx_borrow = rx.borrow_mut();
    let send_task = async {
        use futures::SinkExt;
        while let Some(text) = rx_borrow.next().await {
            if !connected.get() && !may_send_before_connect(&text) {
                log::debug!("socket not connected, dropping {text}");
                continue;
            }
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text,
                Ok(Message::Bytes(_)) => continue,
                Err(e) => {
                    log::warn!("socket recv error: {e}");
                    break;
                }
            };
            let packet = match wire::socketio::decode(&text) {
                Ok(packet) => packet,
                Err(e) => {
                    log::warn!("undecodable socket packet: {e}");
                    continue;
                }
            };
            match react(&packet) {
                Reaction::Reply(reply) => {
                    let _ = tx.unbounded_send(wire::socketio::encode(&reply));
                }
                Reaction::Connected => {
                    connected.set(true);
                    controller.dispatch(Msg::SocketConnected);
                }
                Reaction::Deliver(ServerEvent::NewMessage(message)) => {
                    controller.dispatch(Msg::Pushed(message));
                }
                Reaction::Close => break,
                Reaction::Ignore => {}
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;
    Ok(connected.get())
}
