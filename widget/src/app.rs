//! Root widget component.

use conversation::{Msg, Session};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::{chat_box::ChatBox, input_bar::InputBar};
use crate::config::WidgetConfig;
use crate::net::socket::SocketSender;
use crate::runtime::Controller;
use crate::util::{clock, storage};

/// Root component.
///
/// Builds the session from stored credentials, provides the [`Controller`]
/// to children, opens the live-agent socket and starts the conversation.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = WidgetConfig::load();
    let session = RwSignal::new(Session::new(
        config.session_config(),
        storage::load_credentials(),
        clock::now_iso(),
    ));
    let socket = RwSignal::new(SocketSender::default());
    let controller = Controller::new(session, socket, config.clone());
    provide_context(controller);

    #[cfg(feature = "csr")]
    {
        match config.socket_url(&crate::config::page_origin()) {
            Some(url) => socket.set(crate::net::socket::spawn_socket(url, controller)),
            None => log::warn!("live-agent channel disabled: no usable origin"),
        }
    }

    controller.dispatch(Msg::Started);

    view! {
        <Title text="Financial Assistant"/>
        <div class="chat-widget">
            <header class="chat-widget__header">
                <span class="chat-widget__title">"Financial Assistant"</span>
            </header>
            <ChatBox/>
            <InputBar/>
        </div>
    }
}
