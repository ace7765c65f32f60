use super::*;

fn entry(sender: Sender, content: &str, timestamp: Option<&str>) -> Entry {
    Entry {
        sender,
        content: content.to_owned(),
        timestamp: timestamp.map(ToOwned::to_owned),
        markdown: false,
    }
}

#[test]
fn entries_are_prefixed_with_sender() {
    assert_eq!(render_entry(&entry(Sender::User, "my emi", None)), "[you] my emi");
    assert_eq!(render_entry(&entry(Sender::Bot, "Hello", None)), "[bot] Hello");
}

#[test]
fn agent_entries_show_badge_and_time() {
    let rendered = render_entry(&entry(Sender::Agent, "On it", Some("2024-05-01 09:05:00")));
    assert_eq!(rendered, "[Live Agent 09:05] On it");
    assert_eq!(render_entry(&entry(Sender::Agent, "On it", None)), "[Live Agent] On it");
}

#[test]
fn multi_line_content_is_indented() {
    let rendered = render_entry(&entry(Sender::Bot, "Balance:\n- Savings 100", None));
    assert_eq!(rendered, "[bot] Balance:\n    - Savings 100");
}

#[test]
fn prompts_render_numbered_choices() {
    assert_eq!(
        render_prompt(Prompt::Intents),
        "  1) My EMI\n  2) My Account Balance\n  3) My Loan Amount"
    );
    assert!(render_prompt(Prompt::AgentHandoff).contains("1) Yes, connect with agent"));
}

#[test]
fn numbers_pick_prompt_choices() {
    assert_eq!(parse_input("2", Some(Prompt::Intents)), Input::Send(Msg::IntentChosen(Intent::Balance)));
    assert_eq!(parse_input(" 1 ", Some(Prompt::AgentHandoff)), Input::Send(Msg::HandoffChosen(true)));
    assert_eq!(parse_input("2", Some(Prompt::Feedback)), Input::Send(Msg::FeedbackGiven(false)));
}

#[test]
fn out_of_range_numbers_are_free_text() {
    assert_eq!(parse_input("4", Some(Prompt::Intents)), Input::Send(Msg::Submit("4".to_owned())));
    assert_eq!(parse_input("0", Some(Prompt::Feedback)), Input::Send(Msg::Submit("0".to_owned())));
    assert_eq!(parse_input("123456", None), Input::Send(Msg::Submit("123456".to_owned())));
}

#[test]
fn blank_lines_and_quit() {
    assert_eq!(parse_input("   ", Some(Prompt::Intents)), Input::Nothing);
    assert_eq!(parse_input("/quit", None), Input::Quit);
}
