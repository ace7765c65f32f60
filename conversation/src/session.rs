//! Conversation controller.
//!
//! `Session::update` is the only place session state changes. It consumes a
//! [`Msg`] and returns the [`Effect`]s the front end must run; effect results
//! come back as further messages.
//!
//! While a request is awaited the session rejects new submissions and prompt
//! clicks, so a double submit cannot race two OTP or chat calls.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::time::Duration;

use wire::RequestError;
use wire::http::{
    AgentMessagesResponse, ChatRequest, ChatResponse, CheckAgentMessagesRequest, Endpoint,
    QueryRequest, QueryResponse, SendOtpRequest, SendOtpResponse, TranscriptRequest,
    VerifyOtpRequest, VerifyOtpResponse,
};
use wire::realtime::NewMessage;

use crate::copy;
use crate::credentials::Credentials;
use crate::history::ChatHistory;
use crate::intent::{Intent, IntentRoute, PendingQuery};
use crate::stage::Stage;

/// Delays shared by every front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Delay before the greeting and intent buttons appear.
    pub greeting: Duration,
    /// Delay before the "anything else?" reset after a handoff or feedback.
    pub reset: Duration,
    /// Agent-message poll interval.
    pub poll: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            greeting: Duration::from_millis(1000),
            reset: Duration::from_millis(1500),
            poll: Duration::from_millis(3000),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub timings: Timings,
    pub intent_route: IntentRoute,
}

/// Transient affordance shown under the last message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    Intents,
    AgentHandoff,
    Feedback,
}

/// Request the session is blocked on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Awaiting {
    SendOtp,
    VerifyOtp,
    Chat,
    Query,
    ConnectAgent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    Greeting,
    Reset,
}

/// Backend call to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    SendOtp(SendOtpRequest),
    VerifyOtp(VerifyOtpRequest),
    Chat(ChatRequest),
    Query(QueryRequest),
    ConnectAgent(TranscriptRequest),
    SummarizeChat(TranscriptRequest),
    CheckAgentMessages(CheckAgentMessagesRequest),
}

impl Request {
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::SendOtp(_) => Endpoint::SendOtp,
            Self::VerifyOtp(_) => Endpoint::VerifyOtp,
            Self::Chat(_) => Endpoint::Chat,
            Self::Query(_) => Endpoint::Query,
            Self::ConnectAgent(_) => Endpoint::ConnectAgent,
            Self::SummarizeChat(_) => Endpoint::SummarizeChat,
            Self::CheckAgentMessages(_) => Endpoint::CheckAgentMessages,
        }
    }
}

/// Input to [`Session::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// The widget mounted.
    Started,
    TimerFired(Timer),
    /// Text typed into the input box.
    Submit(String),
    IntentChosen(Intent),
    /// `true` for "connect me", `false` for "continue with bot".
    HandoffChosen(bool),
    /// `true` for thumbs-up.
    FeedbackGiven(bool),
    OtpSent(Result<SendOtpResponse, RequestError>),
    OtpVerified(Result<VerifyOtpResponse, RequestError>),
    ChatReplied(Result<ChatResponse, RequestError>),
    QueryAnswered(Result<QueryResponse, RequestError>),
    AgentConnected(Result<(), RequestError>),
    SummaryLogged(Result<(), RequestError>),
    /// Poll timer tick, carrying the credentials currently in storage.
    PollTick(Credentials),
    AgentMessagesFetched {
        result: Result<AgentMessagesResponse, RequestError>,
        /// Time the response arrived; becomes the next `last_check_time`.
        checked_at: String,
    },
    /// Realtime channel connected (or reconnected).
    SocketConnected,
    /// Realtime `new_message` event.
    Pushed(NewMessage),
}

/// Side effect requested by [`Session::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Request(Request),
    Schedule { timer: Timer, after: Duration },
    PersistCredentials(Credentials),
    JoinRoom(String),
    /// Start the poll timer; emitted at most once per session.
    StartPolling(Duration),
}

#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    stage: Stage,
    history: ChatHistory,
    pending: Option<PendingQuery>,
    account_id: Option<String>,
    prompt: Option<Prompt>,
    awaiting: Option<Awaiting>,
    credentials: Credentials,
    last_agent_check: String,
    polling: bool,
    poll_in_flight: bool,
}

impl Session {
    /// Create a session with stored `credentials`, started at `started_at`
    /// (the initial `last_check_time` for agent polling).
    #[must_use]
    pub fn new(config: SessionConfig, credentials: Credentials, started_at: impl Into<String>) -> Self {
        Self {
            config,
            stage: Stage::Greeting,
            history: ChatHistory::new(),
            pending: None,
            account_id: None,
            prompt: None,
            awaiting: None,
            credentials,
            last_agent_check: started_at.into(),
            polling: false,
            poll_in_flight: false,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingQuery> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    #[must_use]
    pub fn awaiting(&self) -> Option<Awaiting> {
        self.awaiting
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn last_agent_check(&self) -> &str {
        &self.last_agent_check
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Loader is visible exactly while a request is awaited.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.awaiting.is_some()
    }

    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.awaiting.is_none()
    }

    /// Apply one message and return the effects to run.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Started => self.on_started(),
            Msg::TimerFired(Timer::Greeting) => self.on_greeting(),
            Msg::TimerFired(Timer::Reset) => self.on_reset(),
            Msg::Submit(text) => self.on_submit(&text),
            Msg::IntentChosen(intent) => self.on_intent(intent),
            Msg::HandoffChosen(connect) => self.on_handoff(connect),
            Msg::FeedbackGiven(useful) => self.on_feedback(useful),
            Msg::OtpSent(result) => self.on_otp_sent(result),
            Msg::OtpVerified(result) => self.on_otp_verified(result),
            Msg::ChatReplied(result) => self.on_chat_replied(result),
            Msg::QueryAnswered(result) => self.on_query_answered(result),
            Msg::AgentConnected(result) => self.on_agent_connected(result),
            Msg::SummaryLogged(_) => Vec::new(),
            Msg::PollTick(credentials) => self.on_poll_tick(credentials),
            Msg::AgentMessagesFetched { result, checked_at } => self.on_agent_messages(result, checked_at),
            Msg::SocketConnected => self.on_socket_connected(),
            Msg::Pushed(message) => self.on_pushed(message),
        }
    }

    fn on_started(&mut self) -> Vec<Effect> {
        let mut effects = vec![Effect::Schedule { timer: Timer::Greeting, after: self.config.timings.greeting }];
        if self.credentials.authenticated {
            effects.extend(self.start_polling());
        }
        effects
    }

    fn on_greeting(&mut self) -> Vec<Effect> {
        self.history.push_bot(copy::GREETING);
        // The user may have typed before the greeting appeared.
        if self.stage == Stage::Greeting {
            self.prompt = Some(Prompt::Intents);
        }
        Vec::new()
    }

    fn on_reset(&mut self) -> Vec<Effect> {
        self.history.push_bot(copy::ANYTHING_ELSE);
        self.advance(Stage::Chat);
        self.pending = None;
        self.prompt = Some(Prompt::Intents);
        Vec::new()
    }

    fn on_submit(&mut self, raw: &str) -> Vec<Effect> {
        let text = raw.trim();
        if text.is_empty() || !self.accepts_input() {
            return Vec::new();
        }

        self.history.push_user(text);
        self.prompt = None;

        match self.stage {
            Stage::Greeting => {
                self.capture_pending(PendingQuery::Text(text.to_owned()));
                Vec::new()
            }
            Stage::AwaitingAccountId => {
                self.account_id = Some(text.to_owned());
                self.awaiting = Some(Awaiting::SendOtp);
                vec![Effect::Request(Request::SendOtp(SendOtpRequest { account_id: text.to_owned() }))]
            }
            Stage::AwaitingOtp => {
                self.awaiting = Some(Awaiting::VerifyOtp);
                vec![Effect::Request(Request::VerifyOtp(VerifyOtpRequest { otp: text.to_owned() }))]
            }
            Stage::Chat => self.ask(PendingQuery::Text(text.to_owned())),
        }
    }

    fn on_intent(&mut self, intent: Intent) -> Vec<Effect> {
        if self.prompt != Some(Prompt::Intents) || !self.accepts_input() {
            return Vec::new();
        }
        match self.stage {
            Stage::Greeting => {
                self.history.push_user(intent.label());
                self.prompt = None;
                self.capture_pending(PendingQuery::Intent(intent));
                Vec::new()
            }
            Stage::Chat => {
                self.history.push_user(intent.label());
                self.prompt = None;
                self.ask(PendingQuery::Intent(intent))
            }
            Stage::AwaitingAccountId | Stage::AwaitingOtp => Vec::new(),
        }
    }

    fn capture_pending(&mut self, query: PendingQuery) {
        self.pending = Some(query);
        self.history.push_bot(copy::ASK_ACCOUNT_ID);
        self.advance(Stage::AwaitingAccountId);
    }

    /// Send an authenticated query, via `/query` for intents when configured.
    fn ask(&mut self, query: PendingQuery) -> Vec<Effect> {
        if let (IntentRoute::Direct, PendingQuery::Intent(intent), Some(account_id)) =
            (self.config.intent_route, &query, &self.account_id)
        {
            self.awaiting = Some(Awaiting::Query);
            return vec![Effect::Request(Request::Query(QueryRequest {
                account_id: account_id.clone(),
                query_type: intent.value().to_owned(),
            }))];
        }

        self.awaiting = Some(Awaiting::Chat);
        vec![Effect::Request(Request::Chat(ChatRequest {
            message: query.message().to_owned(),
            chat_history: self.history.to_chat_items(),
        }))]
    }

    fn on_otp_sent(&mut self, result: Result<SendOtpResponse, RequestError>) -> Vec<Effect> {
        if !self.settle(Awaiting::SendOtp) {
            return Vec::new();
        }
        match result {
            Ok(resp) => {
                self.history.push_bot(resp.message.unwrap_or_else(|| copy::UNKNOWN_ERROR.to_owned()));
                self.advance(Stage::AwaitingOtp);
            }
            Err(RequestError::Status { message, .. }) => {
                self.history.push_bot(message.unwrap_or_else(|| copy::UNKNOWN_ERROR.to_owned()));
            }
            Err(_) => self.history.push_bot(copy::OTP_SEND_NETWORK_ERROR),
        }
        Vec::new()
    }

    fn on_otp_verified(&mut self, result: Result<VerifyOtpResponse, RequestError>) -> Vec<Effect> {
        if !self.settle(Awaiting::VerifyOtp) {
            return Vec::new();
        }
        let resp = match result {
            Ok(resp) => resp,
            Err(RequestError::Status { message, .. }) => {
                self.history.push_bot(message.unwrap_or_else(|| copy::UNKNOWN_ERROR.to_owned()));
                return Vec::new();
            }
            Err(_) => {
                self.history.push_bot(copy::OTP_VERIFY_NETWORK_ERROR);
                return Vec::new();
            }
        };

        self.history.push_bot(resp.message.unwrap_or_else(|| copy::UNKNOWN_ERROR.to_owned()));
        self.advance(Stage::Chat);

        let mut effects = Vec::new();
        if let Some(pending) = self.pending.take() {
            effects.extend(self.ask(pending));
        }

        self.credentials = Credentials::verified(resp.customer_id);
        effects.push(Effect::PersistCredentials(self.credentials.clone()));
        if let Some(customer_id) = &self.credentials.customer_id {
            effects.push(Effect::JoinRoom(customer_id.clone()));
        }
        effects.extend(self.start_polling());
        effects
    }

    fn on_chat_replied(&mut self, result: Result<ChatResponse, RequestError>) -> Vec<Effect> {
        if !self.settle(Awaiting::Chat) {
            return Vec::new();
        }
        match result {
            Ok(resp) => {
                self.history.push_reply(resp.reply);
                if resp.needs_agent {
                    self.history.push_bot(copy::OFFER_AGENT);
                    self.prompt = Some(Prompt::AgentHandoff);
                } else {
                    self.prompt = Some(Prompt::Feedback);
                }
            }
            Err(err) => self.fail_query(&err),
        }
        Vec::new()
    }

    fn on_query_answered(&mut self, result: Result<QueryResponse, RequestError>) -> Vec<Effect> {
        if !self.settle(Awaiting::Query) {
            return Vec::new();
        }
        match result {
            Ok(resp) if resp.is_success() => {
                self.history.push_reply(resp.text().unwrap_or(copy::UNKNOWN_ERROR).to_owned());
                self.prompt = Some(Prompt::Feedback);
            }
            Ok(resp) => {
                self.history.push_bot(resp.message.unwrap_or_else(|| copy::FETCH_FAILED.to_owned()));
                self.prompt = Some(Prompt::AgentHandoff);
            }
            Err(err) => self.fail_query(&err),
        }
        Vec::new()
    }

    fn fail_query(&mut self, err: &RequestError) {
        let line = if err.is_status() { copy::FETCH_FAILED } else { copy::NETWORK_ERROR };
        self.history.push_bot(line);
        self.prompt = Some(Prompt::AgentHandoff);
    }

    fn on_handoff(&mut self, connect: bool) -> Vec<Effect> {
        if self.prompt != Some(Prompt::AgentHandoff) || !self.accepts_input() {
            return Vec::new();
        }
        self.prompt = None;

        if connect {
            self.history.push_bot(copy::CONNECTING_AGENT);
            self.awaiting = Some(Awaiting::ConnectAgent);
            vec![Effect::Request(Request::ConnectAgent(TranscriptRequest {
                chat_history: self.history.to_transcript(),
            }))]
        } else {
            self.history.push_bot(copy::CONTINUE_WITH_BOT);
            vec![self.schedule_reset()]
        }
    }

    fn on_agent_connected(&mut self, result: Result<(), RequestError>) -> Vec<Effect> {
        if !self.settle(Awaiting::ConnectAgent) {
            return Vec::new();
        }
        let line = if result.is_ok() { copy::AGENT_CONNECTED } else { copy::AGENT_CONNECT_FAILED };
        self.history.push_bot(line);
        vec![self.schedule_reset()]
    }

    fn on_feedback(&mut self, useful: bool) -> Vec<Effect> {
        if self.prompt != Some(Prompt::Feedback) || !self.accepts_input() {
            return Vec::new();
        }
        self.prompt = None;
        self.history.push_bot(copy::FEEDBACK_THANKS);

        let mut effects = Vec::new();
        if !useful {
            self.history.push_bot(copy::FEEDBACK_LOGGED);
            effects.push(Effect::Request(Request::SummarizeChat(TranscriptRequest {
                chat_history: self.history.to_transcript(),
            })));
        }
        effects.push(self.schedule_reset());
        effects
    }

    fn on_poll_tick(&mut self, credentials: Credentials) -> Vec<Effect> {
        self.credentials = credentials;
        if self.poll_in_flight {
            return Vec::new();
        }
        let (true, Some(customer_id)) = (self.credentials.authenticated, &self.credentials.customer_id) else {
            return Vec::new();
        };
        self.poll_in_flight = true;
        vec![Effect::Request(Request::CheckAgentMessages(CheckAgentMessagesRequest {
            customer_id: customer_id.clone(),
            last_check_time: self.last_agent_check.clone(),
        }))]
    }

    fn on_agent_messages(
        &mut self,
        result: Result<AgentMessagesResponse, RequestError>,
        checked_at: String,
    ) -> Vec<Effect> {
        self.poll_in_flight = false;
        let Ok(resp) = result else {
            return Vec::new();
        };
        if resp.messages.is_empty() {
            return Vec::new();
        }
        self.last_agent_check = checked_at;
        for message in resp.messages {
            self.append_agent(message.message_text, Some(message.timestamp));
        }
        Vec::new()
    }

    fn on_socket_connected(&mut self) -> Vec<Effect> {
        match (&self.credentials.customer_id, self.credentials.authenticated) {
            (Some(customer_id), true) => vec![Effect::JoinRoom(customer_id.clone())],
            _ => Vec::new(),
        }
    }

    fn on_pushed(&mut self, message: NewMessage) -> Vec<Effect> {
        if message.is_from_agent() {
            self.append_agent(message.message, message.timestamp);
        }
        Vec::new()
    }

    fn append_agent(&mut self, text: String, timestamp: Option<String>) {
        // Poll and push can both deliver the same message.
        if !self.history.has_agent_message(&text, timestamp.as_deref()) {
            self.history.push_agent(text, timestamp);
        }
    }

    fn start_polling(&mut self) -> Option<Effect> {
        if self.polling {
            return None;
        }
        self.polling = true;
        Some(Effect::StartPolling(self.config.timings.poll))
    }

    fn schedule_reset(&self) -> Effect {
        Effect::Schedule { timer: Timer::Reset, after: self.config.timings.reset }
    }

    /// Clear the awaited request if it is `kind`; stale results return `false`.
    fn settle(&mut self, kind: Awaiting) -> bool {
        if self.awaiting == Some(kind) {
            self.awaiting = None;
            true
        } else {
            false
        }
    }

    fn advance(&mut self, next: Stage) {
        if next > self.stage {
            self.stage = next;
        }
    }
}
