//! Effect runner bridging the pure [`Session`] to the browser.
//!
//! Components and the socket loop never mutate the session directly: they
//! call [`Controller::dispatch`], which applies the message inside the
//! session signal and then performs the returned effects (HTTP calls,
//! timers, `localStorage`, socket sends).
//!
//! Every dispatch notifies the session signal, including no-op poll ticks.
//! Views that scroll, focus or rebuild lists read through the memos below,
//! which only propagate when their value actually changes.

#[cfg(test)]
#[path = "runtime_test.rs"]
mod runtime_test;

use conversation::{Effect, Entry, Msg, Prompt, Session};
use leptos::prelude::*;

use crate::config::WidgetConfig;
use crate::net::socket::SocketSender;

#[derive(Clone, Copy)]
pub struct Controller {
    session: RwSignal<Session>,
    socket: RwSignal<SocketSender>,
    config: StoredValue<WidgetConfig>,
    entries: Memo<Vec<Entry>>,
    prompt: Memo<Option<Prompt>>,
    loading: Memo<bool>,
    scroll_key: Memo<(usize, Option<Prompt>, bool)>,
}

impl Controller {
    pub fn new(session: RwSignal<Session>, socket: RwSignal<SocketSender>, config: WidgetConfig) -> Self {
        let entries = Memo::new(move |_| session.with(|s| s.history().entries().to_vec()));
        let prompt = Memo::new(move |_| session.with(Session::prompt));
        let loading = Memo::new(move |_| session.with(Session::is_loading));
        let scroll_key = Memo::new(move |_| session.with(|s| (s.history().len(), s.prompt(), s.is_loading())));
        Self { session, socket, config: StoredValue::new(config), entries, prompt, loading, scroll_key }
    }

    /// Reactive handle on the session for rendering.
    pub fn session(self) -> RwSignal<Session> {
        self.session
    }

    pub fn entries(self) -> Memo<Vec<Entry>> {
        self.entries
    }

    pub fn prompt(self) -> Memo<Option<Prompt>> {
        self.prompt
    }

    /// True while a request is awaited; input is accepted otherwise.
    pub fn loading(self) -> Memo<bool> {
        self.loading
    }

    /// Changes whenever the chat box should stick to the bottom again.
    pub fn scroll_key(self) -> Memo<(usize, Option<Prompt>, bool)> {
        self.scroll_key
    }

    /// Apply `msg` to the session and run the effects it requests.
    pub fn dispatch(self, msg: Msg) {
        let Some(effects) = self.session.try_update(|session| session.update(msg)) else {
            log::warn!("session disposed, dropping message");
            return;
        };
        for effect in effects {
            self.run(effect);
        }
    }

    #[cfg(feature = "csr")]
    fn run(self, effect: Effect) {
        use std::time::Duration;

        use crate::util::storage;

        match effect {
            Effect::Request(request) => {
                let base = self.config.with_value(|config| config.base_url.clone());
                leptos::task::spawn_local(async move {
                    let msg = perform(&base, request).await;
                    self.dispatch(msg);
                });
            }
            Effect::Schedule { timer, after } => {
                leptos::task::spawn_local(async move {
                    gloo_timers::future::sleep(after).await;
                    self.dispatch(Msg::TimerFired(timer));
                });
            }
            Effect::PersistCredentials(credentials) => storage::save_credentials(&credentials),
            Effect::JoinRoom(customer_id) => {
                let packet = wire::realtime::join_customer_room(&customer_id);
                if !self.socket.with_untracked(|socket| socket.send(&packet)) {
                    log::warn!("live-agent socket unavailable, room join skipped");
                }
            }
            Effect::StartPolling(interval) => {
                log::info!("polling agent messages every {}ms", interval.as_millis());
                leptos::task::spawn_local(async move {
                    loop {
                        gloo_timers::future::sleep(interval.max(Duration::from_millis(100))).await;
                        self.dispatch(Msg::PollTick(storage::load_credentials()));
                    }
                });
            }
        }
    }

    #[cfg(not(feature = "csr"))]
    fn run(self, effect: Effect) {
        let _ = (self.socket, self.config);
        log::debug!("no browser runtime, dropping {effect:?}");
    }
}

/// Execute one backend request and wrap the result as a session message.
#[cfg(feature = "csr")]
async fn perform(base: &str, request: conversation::Request) -> Msg {
    use conversation::Request;

    use crate::net::api;
    use crate::util::clock;

    match request {
        Request::SendOtp(body) => Msg::OtpSent(api::send_otp(base, &body).await),
        Request::VerifyOtp(body) => Msg::OtpVerified(api::verify_otp(base, &body).await),
        Request::Chat(body) => Msg::ChatReplied(api::chat(base, &body).await),
        Request::Query(body) => Msg::QueryAnswered(api::query(base, &body).await),
        Request::ConnectAgent(body) => Msg::AgentConnected(api::connect_agent(base, &body).await),
        Request::SummarizeChat(body) => Msg::SummaryLogged(api::summarize_chat(base, &body).await),
        Request::CheckAgentMessages(body) => {
            let result = api::check_agent_messages(base, &body).await;
            Msg::AgentMessagesFetched { result, checked_at: clock::now_iso() }
        }
    }
}
