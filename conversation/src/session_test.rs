use super::*;
use crate::history::Sender;
use wire::http::AgentMessage;

const STARTED_AT: &str = "2024-05-01T10:00:00Z";

fn session() -> Session {
    Session::new(SessionConfig::default(), Credentials::default(), STARTED_AT)
}

fn greeted() -> Session {
    let mut s = session();
    s.update(Msg::Started);
    s.update(Msg::TimerFired(Timer::Greeting));
    s
}

fn endpoints(effects: &[Effect]) -> Vec<Endpoint> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Request(req) => Some(req.endpoint()),
            _ => None,
        })
        .collect()
}

fn last_bot(s: &Session) -> &str {
    let entry = s.history().last().expect("history should not be empty");
    assert_eq!(entry.sender, Sender::Bot);
    &entry.content
}

fn otp_sent_ok(message: &str) -> Msg {
    Msg::OtpSent(Ok(SendOtpResponse { message: Some(message.to_owned()), status: Some("success".to_owned()) }))
}

fn otp_verified_ok(customer_id: &str) -> Msg {
    Msg::OtpVerified(Ok(VerifyOtpResponse {
        message: Some("OTP verified successfully.".to_owned()),
        customer_id: Some(customer_id.to_owned()),
    }))
}

/// Drive a session from greeting to the chat stage via the EMI button.
fn authenticated() -> Session {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Emi));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(otp_sent_ok("OTP sent"));
    s.update(Msg::Submit("4321".to_owned()));
    s.update(otp_verified_ok("C-1"));
    s.update(Msg::ChatReplied(Ok(ChatResponse { reply: "Your EMI is 1,200.".to_owned(), needs_agent: false })));
    s
}

// =============================================================
// Startup
// =============================================================

#[test]
fn started_schedules_greeting_without_polling_when_unauthenticated() {
    let mut s = session();
    let effects = s.update(Msg::Started);
    assert_eq!(
        effects,
        vec![Effect::Schedule { timer: Timer::Greeting, after: Duration::from_millis(1000) }]
    );
    assert!(!s.is_polling());
}

#[test]
fn started_resumes_polling_for_stored_authenticated_session() {
    let creds = Credentials::from_stored(Some("true"), Some("C-1"));
    let mut s = Session::new(SessionConfig::default(), creds, STARTED_AT);
    let effects = s.update(Msg::Started);
    assert!(effects.contains(&Effect::StartPolling(Duration::from_millis(3000))));
    assert_eq!(s.stage(), Stage::Greeting);
}

#[test]
fn greeting_timer_shows_greeting_and_intents() {
    let s = greeted();
    assert_eq!(last_bot(&s), copy::GREETING);
    assert_eq!(s.prompt(), Some(Prompt::Intents));
}

#[test]
fn greeting_after_early_input_does_not_show_intents() {
    let mut s = session();
    s.update(Msg::Started);
    s.update(Msg::Submit("what is my balance".to_owned()));
    s.update(Msg::TimerFired(Timer::Greeting));
    assert_eq!(s.stage(), Stage::AwaitingAccountId);
    assert_eq!(s.prompt(), None);
}

// =============================================================
// Greeting stage
// =============================================================

#[test]
fn intent_click_captures_pending_and_asks_for_account() {
    let mut s = greeted();
    let effects = s.update(Msg::IntentChosen(Intent::Emi));
    assert!(effects.is_empty());
    assert_eq!(s.stage(), Stage::AwaitingAccountId);
    assert_eq!(s.pending(), Some(&PendingQuery::Intent(Intent::Emi)));
    assert_eq!(s.prompt(), None);
    assert_eq!(last_bot(&s), copy::ASK_ACCOUNT_ID);
    assert_eq!(s.history().entries()[1].content, "My EMI");
}

#[test]
fn free_text_captures_pending_and_advances() {
    let mut s = greeted();
    s.update(Msg::Submit("  when is my next EMI due?  ".to_owned()));
    assert_eq!(s.stage(), Stage::AwaitingAccountId);
    assert_eq!(s.pending(), Some(&PendingQuery::Text("when is my next EMI due?".to_owned())));
    assert_eq!(s.prompt(), None);
}

#[test]
fn blank_input_is_ignored() {
    let mut s = greeted();
    let before = s.history().len();
    assert!(s.update(Msg::Submit("   \n ".to_owned())).is_empty());
    assert_eq!(s.history().len(), before);
    assert_eq!(s.stage(), Stage::Greeting);
}

#[test]
fn intent_click_without_visible_intents_is_ignored() {
    let mut s = session();
    s.update(Msg::Started);
    assert!(s.update(Msg::IntentChosen(Intent::Loan)).is_empty());
    assert!(s.history().is_empty());
    assert_eq!(s.stage(), Stage::Greeting);
}

// =============================================================
// OTP dispatch
// =============================================================

#[test]
fn account_id_submission_calls_send_otp_and_shows_loader() {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Balance));
    let effects = s.update(Msg::Submit("12345".to_owned()));
    assert_eq!(
        effects,
        vec![Effect::Request(Request::SendOtp(SendOtpRequest { account_id: "12345".to_owned() }))]
    );
    assert!(s.is_loading());
    assert!(!s.accepts_input());
}

#[test]
fn send_otp_success_advances_to_awaiting_otp_never_beyond() {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Emi));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(otp_sent_ok("OTP sent to your registered mobile number."));
    assert_eq!(s.stage(), Stage::AwaitingOtp);
    assert!(!s.is_loading());
    assert_eq!(last_bot(&s), "OTP sent to your registered mobile number.");
}

#[test]
fn send_otp_failure_keeps_stage_and_shows_server_message_verbatim() {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Emi));
    s.update(Msg::Submit("99999".to_owned()));
    s.update(Msg::OtpSent(Err(RequestError::Status { code: 404, message: Some("Account not found".to_owned()) })));
    assert_eq!(s.stage(), Stage::AwaitingAccountId);
    assert_eq!(last_bot(&s), "Account not found");
    assert!(s.accepts_input());

    // The user can retry with another account ID.
    let effects = s.update(Msg::Submit("12345".to_owned()));
    assert_eq!(endpoints(&effects), vec![Endpoint::SendOtp]);
}

#[test]
fn send_otp_network_error_shows_fixed_message() {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Emi));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(Msg::OtpSent(Err(RequestError::Network("offline".to_owned()))));
    assert_eq!(s.stage(), Stage::AwaitingAccountId);
    assert_eq!(last_bot(&s), copy::OTP_SEND_NETWORK_ERROR);
}

#[test]
fn send_otp_success_without_message_uses_unknown_error_line() {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Emi));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(Msg::OtpSent(Ok(SendOtpResponse::default())));
    assert_eq!(s.stage(), Stage::AwaitingOtp);
    assert_eq!(last_bot(&s), copy::UNKNOWN_ERROR);
}

#[test]
fn submissions_while_awaiting_are_rejected() {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Emi));
    s.update(Msg::Submit("12345".to_owned()));
    let before = s.history().len();
    assert!(s.update(Msg::Submit("12345".to_owned())).is_empty());
    assert_eq!(s.history().len(), before);
}

#[test]
fn stale_result_is_ignored() {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Emi));
    let before = s.history().len();
    s.update(otp_sent_ok("OTP sent"));
    assert_eq!(s.stage(), Stage::AwaitingAccountId);
    assert_eq!(s.history().len(), before);
}

// =============================================================
// OTP verification
// =============================================================

#[test]
fn verify_success_replays_pending_intent_and_persists_credentials() {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Emi));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(otp_sent_ok("OTP sent"));

    let effects = s.update(Msg::Submit("000000".to_owned()));
    assert_eq!(effects, vec![Effect::Request(Request::VerifyOtp(VerifyOtpRequest { otp: "000000".to_owned() }))]);

    let effects = s.update(otp_verified_ok("C-1"));
    assert_eq!(s.stage(), Stage::Chat);
    assert_eq!(s.pending(), None);

    let Some(Effect::Request(Request::Chat(chat))) = effects.first() else {
        panic!("expected replayed chat request first, got {effects:?}");
    };
    assert_eq!(chat.message, "emi");
    assert_eq!(chat.chat_history.len(), s.history().len());

    assert!(effects.contains(&Effect::PersistCredentials(Credentials::verified(Some("C-1".to_owned())))));
    assert!(effects.contains(&Effect::JoinRoom("C-1".to_owned())));
    assert!(effects.contains(&Effect::StartPolling(Duration::from_millis(3000))));
    assert_eq!(s.awaiting(), Some(Awaiting::Chat));
    assert!(s.credentials().can_poll());
}

#[test]
fn verify_failure_keeps_awaiting_otp() {
    let mut s = greeted();
    s.update(Msg::Submit("balance".to_owned()));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(otp_sent_ok("OTP sent"));
    s.update(Msg::Submit("111111".to_owned()));
    let effects =
        s.update(Msg::OtpVerified(Err(RequestError::Status { code: 401, message: Some("Invalid OTP".to_owned()) })));
    assert!(effects.is_empty());
    assert_eq!(s.stage(), Stage::AwaitingOtp);
    assert_eq!(last_bot(&s), "Invalid OTP");
    assert_eq!(s.pending(), Some(&PendingQuery::Text("balance".to_owned())));
    assert!(!s.credentials().authenticated);
}

#[test]
fn verify_network_error_shows_fixed_message() {
    let mut s = greeted();
    s.update(Msg::IntentChosen(Intent::Loan));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(otp_sent_ok("OTP sent"));
    s.update(Msg::Submit("111111".to_owned()));
    s.update(Msg::OtpVerified(Err(RequestError::Decode("eof".to_owned()))));
    assert_eq!(s.stage(), Stage::AwaitingOtp);
    assert_eq!(last_bot(&s), copy::OTP_VERIFY_NETWORK_ERROR);
}

#[test]
fn stage_only_moves_forward_through_every_step() {
    let mut s = greeted();
    let mut seen = vec![s.stage()];
    let steps = vec![
        Msg::IntentChosen(Intent::Emi),
        Msg::Submit("1".to_owned()),
        Msg::OtpSent(Err(RequestError::Status { code: 404, message: None })),
        Msg::Submit("12345".to_owned()),
        otp_sent_ok("ok"),
        Msg::Submit("1".to_owned()),
        Msg::OtpVerified(Err(RequestError::Status { code: 401, message: None })),
        Msg::Submit("2".to_owned()),
        otp_verified_ok("C-1"),
        Msg::ChatReplied(Ok(ChatResponse { reply: "r".to_owned(), needs_agent: true })),
        Msg::HandoffChosen(false),
        Msg::TimerFired(Timer::Reset),
    ];
    for msg in steps {
        s.update(msg);
        seen.push(s.stage());
    }
    for pair in seen.windows(2) {
        assert!(pair[0] <= pair[1], "stage went backwards: {seen:?}");
        assert!(pair[1].index() - pair[0].index() <= 1, "stage skipped: {seen:?}");
    }
    assert_eq!(s.stage(), Stage::Chat);
}

// =============================================================
// Authenticated chat
// =============================================================

#[test]
fn chat_stage_forwards_input_with_history() {
    let mut s = authenticated();
    let effects = s.update(Msg::Submit("and my loan?".to_owned()));
    let [Effect::Request(Request::Chat(chat))] = effects.as_slice() else {
        panic!("expected single chat request, got {effects:?}");
    };
    assert_eq!(chat.message, "and my loan?");
    let last = chat.chat_history.last().expect("history");
    assert_eq!(last.sender, "user");
    assert_eq!(last.content, "and my loan?");
}

#[test]
fn chat_reply_is_markdown_and_offers_feedback() {
    let s = authenticated();
    let entry = s.history().last().expect("entry");
    assert!(entry.markdown);
    assert_eq!(entry.content, "Your EMI is 1,200.");
    assert_eq!(s.prompt(), Some(Prompt::Feedback));
    assert!(!s.is_loading());
}

#[test]
fn low_confidence_reply_offers_agent_handoff() {
    let mut s = authenticated();
    s.update(Msg::Submit("I want to restructure my loan".to_owned()));
    s.update(Msg::ChatReplied(Ok(ChatResponse { reply: "I'm not sure.".to_owned(), needs_agent: true })));
    assert_eq!(last_bot(&s), copy::OFFER_AGENT);
    assert_eq!(s.prompt(), Some(Prompt::AgentHandoff));
}

#[test]
fn chat_status_failure_falls_back_to_handoff() {
    let mut s = authenticated();
    s.update(Msg::Submit("balance".to_owned()));
    s.update(Msg::ChatReplied(Err(RequestError::Status { code: 500, message: None })));
    assert_eq!(last_bot(&s), copy::FETCH_FAILED);
    assert_eq!(s.prompt(), Some(Prompt::AgentHandoff));
}

#[test]
fn chat_network_failure_falls_back_to_handoff() {
    let mut s = authenticated();
    s.update(Msg::Submit("balance".to_owned()));
    s.update(Msg::ChatReplied(Err(RequestError::Network("offline".to_owned()))));
    assert_eq!(last_bot(&s), copy::NETWORK_ERROR);
    assert_eq!(s.prompt(), Some(Prompt::AgentHandoff));
}

#[test]
fn history_length_counts_user_inputs_and_responses() {
    let mut s = authenticated();
    let before = s.history().len();
    for i in 0..3 {
        s.update(Msg::Submit(format!("question {i}")));
        s.update(Msg::ChatReplied(Ok(ChatResponse { reply: format!("answer {i}"), needs_agent: false })));
    }
    s.update(Msg::Pushed(NewMessage {
        sender: "agent".to_owned(),
        message: "Hi, Priya here".to_owned(),
        timestamp: Some("2024-05-01T10:20:00".to_owned()),
    }));
    assert_eq!(s.history().len(), before + 3 + 3 + 1);
}

// =============================================================
// Agent handoff
// =============================================================

#[test]
fn declining_handoff_schedules_reset_without_connecting() {
    let mut s = authenticated();
    s.update(Msg::Submit("restructure".to_owned()));
    s.update(Msg::ChatReplied(Ok(ChatResponse { reply: "?".to_owned(), needs_agent: true })));

    let effects = s.update(Msg::HandoffChosen(false));
    assert_eq!(s.prompt(), None);
    assert_eq!(last_bot(&s), copy::CONTINUE_WITH_BOT);
    assert_eq!(effects, vec![Effect::Schedule { timer: Timer::Reset, after: Duration::from_millis(1500) }]);
    assert!(endpoints(&effects).is_empty());
}

#[test]
fn accepting_handoff_posts_transcript_then_resets() {
    let mut s = authenticated();
    s.update(Msg::Submit("restructure".to_owned()));
    s.update(Msg::ChatReplied(Ok(ChatResponse { reply: "?".to_owned(), needs_agent: true })));

    let effects = s.update(Msg::HandoffChosen(true));
    let [Effect::Request(Request::ConnectAgent(body))] = effects.as_slice() else {
        panic!("expected connect_agent request, got {effects:?}");
    };
    assert_eq!(body.chat_history.len(), s.history().len());
    assert_eq!(last_bot(&s), copy::CONNECTING_AGENT);
    assert!(s.is_loading());

    let effects = s.update(Msg::AgentConnected(Ok(())));
    assert_eq!(last_bot(&s), copy::AGENT_CONNECTED);
    assert_eq!(effects, vec![Effect::Schedule { timer: Timer::Reset, after: Duration::from_millis(1500) }]);
    assert!(!s.is_loading());
}

#[test]
fn failed_handoff_still_resets() {
    let mut s = authenticated();
    s.update(Msg::Submit("x".to_owned()));
    s.update(Msg::ChatReplied(Err(RequestError::Status { code: 500, message: None })));
    s.update(Msg::HandoffChosen(true));
    let effects = s.update(Msg::AgentConnected(Err(RequestError::Network("offline".to_owned()))));
    assert_eq!(last_bot(&s), copy::AGENT_CONNECT_FAILED);
    assert_eq!(effects.len(), 1);
}

#[test]
fn handoff_click_without_prompt_is_ignored() {
    let mut s = authenticated();
    assert!(s.update(Msg::HandoffChosen(true)).is_empty());
    assert_eq!(s.prompt(), Some(Prompt::Feedback));
}

#[test]
fn reset_returns_to_chat_with_intents_and_clears_pending() {
    let mut s = authenticated();
    s.update(Msg::FeedbackGiven(true));
    s.update(Msg::TimerFired(Timer::Reset));
    assert_eq!(last_bot(&s), copy::ANYTHING_ELSE);
    assert_eq!(s.stage(), Stage::Chat);
    assert_eq!(s.pending(), None);
    assert_eq!(s.prompt(), Some(Prompt::Intents));
}

#[test]
fn intent_after_reset_is_sent_as_authenticated_query() {
    let mut s = authenticated();
    s.update(Msg::FeedbackGiven(true));
    s.update(Msg::TimerFired(Timer::Reset));
    let effects = s.update(Msg::IntentChosen(Intent::Loan));
    let [Effect::Request(Request::Chat(chat))] = effects.as_slice() else {
        panic!("expected chat request, got {effects:?}");
    };
    assert_eq!(chat.message, "loan");
    assert_eq!(s.stage(), Stage::Chat);
}

// =============================================================
// Feedback
// =============================================================

#[test]
fn positive_feedback_thanks_and_resets() {
    let mut s = authenticated();
    let effects = s.update(Msg::FeedbackGiven(true));
    assert_eq!(last_bot(&s), copy::FEEDBACK_THANKS);
    assert_eq!(effects, vec![Effect::Schedule { timer: Timer::Reset, after: Duration::from_millis(1500) }]);
    assert_eq!(s.prompt(), None);
}

#[test]
fn negative_feedback_requests_summary() {
    let mut s = authenticated();
    let effects = s.update(Msg::FeedbackGiven(false));
    assert_eq!(endpoints(&effects), vec![Endpoint::SummarizeChat]);
    assert_eq!(last_bot(&s), copy::FEEDBACK_LOGGED);
    assert!(!s.is_loading());
    assert!(s.update(Msg::SummaryLogged(Err(RequestError::Network("x".to_owned())))).is_empty());
}

// =============================================================
// Direct query route
// =============================================================

#[test]
fn direct_route_sends_replayed_intent_to_query_endpoint() {
    let config = SessionConfig { intent_route: IntentRoute::Direct, ..SessionConfig::default() };
    let mut s = Session::new(config, Credentials::default(), STARTED_AT);
    s.update(Msg::Started);
    s.update(Msg::TimerFired(Timer::Greeting));
    s.update(Msg::IntentChosen(Intent::Balance));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(otp_sent_ok("OTP sent"));
    s.update(Msg::Submit("0000".to_owned()));
    let effects = s.update(otp_verified_ok("C-1"));
    assert!(effects.contains(&Effect::Request(Request::Query(QueryRequest {
        account_id: "12345".to_owned(),
        query_type: "balance".to_owned(),
    }))));

    s.update(Msg::QueryAnswered(Ok(QueryResponse {
        status: Some("success".to_owned()),
        reply: Some("Your balance is 500.".to_owned()),
        message: None,
    })));
    assert!(s.history().last().expect("entry").markdown);
    assert_eq!(s.prompt(), Some(Prompt::Feedback));

    // Free text still goes through /chat.
    let effects = s.update(Msg::Submit("thanks".to_owned()));
    assert_eq!(endpoints(&effects), vec![Endpoint::Chat]);
}

#[test]
fn direct_route_failure_offers_handoff() {
    let config = SessionConfig { intent_route: IntentRoute::Direct, ..SessionConfig::default() };
    let mut s = Session::new(config, Credentials::default(), STARTED_AT);
    s.update(Msg::Started);
    s.update(Msg::TimerFired(Timer::Greeting));
    s.update(Msg::IntentChosen(Intent::Loan));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(otp_sent_ok("OTP sent"));
    s.update(Msg::Submit("0000".to_owned()));
    s.update(otp_verified_ok("C-1"));
    s.update(Msg::QueryAnswered(Err(RequestError::Status { code: 404, message: Some("No data found".to_owned()) })));
    assert_eq!(last_bot(&s), copy::FETCH_FAILED);
    assert_eq!(s.prompt(), Some(Prompt::AgentHandoff));

    // An error status inside a 200 body is still a failure.
    s.update(Msg::HandoffChosen(false));
    s.update(Msg::TimerFired(Timer::Reset));
    s.update(Msg::IntentChosen(Intent::Loan));
    assert_eq!(s.awaiting(), Some(Awaiting::Query));
    let replies = s.history().len();
    s.update(Msg::QueryAnswered(Ok(QueryResponse {
        status: Some("error".to_owned()),
        reply: None,
        message: Some("No data found".to_owned()),
    })));
    assert_eq!(s.history().len(), replies + 1);
    assert_eq!(last_bot(&s), "No data found");
    assert!(!s.history().last().expect("entry").markdown);
    assert_eq!(s.prompt(), Some(Prompt::AgentHandoff));
}

// =============================================================
// Agent messages
// =============================================================

#[test]
fn poll_requires_authenticated_and_customer_id() {
    let mut s = session();
    assert!(s.update(Msg::PollTick(Credentials::from_stored(Some("true"), None))).is_empty());
    assert!(s.update(Msg::PollTick(Credentials::from_stored(None, Some("C-1")))).is_empty());

    let effects = s.update(Msg::PollTick(Credentials::from_stored(Some("true"), Some("C-1"))));
    assert_eq!(
        effects,
        vec![Effect::Request(Request::CheckAgentMessages(CheckAgentMessagesRequest {
            customer_id: "C-1".to_owned(),
            last_check_time: STARTED_AT.to_owned(),
        }))]
    );
}

#[test]
fn clearing_credentials_suppresses_further_polls() {
    let mut s = authenticated();
    let effects = s.update(Msg::PollTick(s.credentials().clone()));
    assert_eq!(endpoints(&effects), vec![Endpoint::CheckAgentMessages]);
    s.update(Msg::AgentMessagesFetched { result: Ok(AgentMessagesResponse::default()), checked_at: "t".to_owned() });

    assert!(s.update(Msg::PollTick(Credentials::from_stored(None, Some("C-1")))).is_empty());
    assert!(s.update(Msg::PollTick(Credentials::from_stored(Some("true"), None))).is_empty());
}

#[test]
fn overlapping_poll_ticks_issue_one_request() {
    let mut s = session();
    let creds = Credentials::from_stored(Some("true"), Some("C-1"));
    assert_eq!(s.update(Msg::PollTick(creds.clone())).len(), 1);
    assert!(s.update(Msg::PollTick(creds.clone())).is_empty());
    s.update(Msg::AgentMessagesFetched { result: Err(RequestError::Network("x".to_owned())), checked_at: "t".to_owned() });
    assert_eq!(s.update(Msg::PollTick(creds)).len(), 1);
}

#[test]
fn last_check_advances_only_when_messages_arrive() {
    let mut s = session();
    let creds = Credentials::from_stored(Some("true"), Some("C-1"));

    s.update(Msg::PollTick(creds.clone()));
    s.update(Msg::AgentMessagesFetched {
        result: Ok(AgentMessagesResponse::default()),
        checked_at: "2024-05-01T10:00:03Z".to_owned(),
    });
    assert_eq!(s.last_agent_check(), STARTED_AT);

    s.update(Msg::PollTick(creds));
    s.update(Msg::AgentMessagesFetched {
        result: Ok(AgentMessagesResponse {
            messages: vec![AgentMessage {
                message_text: "Hello, I'm Priya from support.".to_owned(),
                timestamp: "2024-05-01T10:00:05".to_owned(),
            }],
        }),
        checked_at: "2024-05-01T10:00:06Z".to_owned(),
    });
    assert_eq!(s.last_agent_check(), "2024-05-01T10:00:06Z");
    let entry = s.history().last().expect("entry");
    assert_eq!(entry.sender, Sender::Agent);
    assert_eq!(entry.timestamp.as_deref(), Some("2024-05-01T10:00:05"));
}

#[test]
fn pushed_agent_message_is_appended_once() {
    let mut s = session();
    let msg = NewMessage {
        sender: "agent".to_owned(),
        message: "On it.".to_owned(),
        timestamp: Some("2024-05-01T10:00:05".to_owned()),
    };
    s.update(Msg::Pushed(msg.clone()));
    s.update(Msg::Pushed(msg));
    assert_eq!(s.history().len(), 1);

    s.update(Msg::PollTick(Credentials::from_stored(Some("true"), Some("C-1"))));
    s.update(Msg::AgentMessagesFetched {
        result: Ok(AgentMessagesResponse {
            messages: vec![AgentMessage {
                message_text: "On it.".to_owned(),
                timestamp: "2024-05-01T10:00:05".to_owned(),
            }],
        }),
        checked_at: "t".to_owned(),
    });
    assert_eq!(s.history().len(), 1);
}

#[test]
fn pushed_non_agent_message_is_ignored() {
    let mut s = session();
    s.update(Msg::Pushed(NewMessage { sender: "customer".to_owned(), message: "hi".to_owned(), timestamp: None }));
    assert!(s.history().is_empty());
}

#[test]
fn socket_connect_joins_room_only_when_authenticated() {
    let mut s = session();
    assert!(s.update(Msg::SocketConnected).is_empty());

    let mut s = authenticated();
    assert_eq!(s.update(Msg::SocketConnected), vec![Effect::JoinRoom("C-1".to_owned())]);
}

#[test]
fn polling_starts_once() {
    let creds = Credentials::from_stored(Some("true"), Some("C-0"));
    let mut s = Session::new(SessionConfig::default(), creds, STARTED_AT);
    s.update(Msg::Started);
    s.update(Msg::TimerFired(Timer::Greeting));
    s.update(Msg::IntentChosen(Intent::Emi));
    s.update(Msg::Submit("12345".to_owned()));
    s.update(otp_sent_ok("OTP sent"));
    s.update(Msg::Submit("0000".to_owned()));
    let effects = s.update(otp_verified_ok("C-1"));
    assert!(!effects.iter().any(|e| matches!(e, Effect::StartPolling(_))));
    assert_eq!(s.credentials().customer_id.as_deref(), Some("C-1"));
}
