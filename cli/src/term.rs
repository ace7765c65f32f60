//! Terminal rendering and input parsing.

#[cfg(test)]
#[path = "term_test.rs"]
mod term_test;

use conversation::copy::{AGENT_BADGE, HANDOFF_NO, HANDOFF_YES};
use conversation::{Entry, Intent, Msg, Prompt, Sender};

/// One line typed by the user.
#[derive(Debug, PartialEq)]
pub enum Input {
    Send(Msg),
    Quit,
    Nothing,
}

pub fn render_entry(entry: &Entry) -> String {
    let label = match entry.sender {
        Sender::User => "you".to_owned(),
        Sender::Bot => "bot".to_owned(),
        Sender::Agent => {
            match entry.timestamp.as_deref().and_then(conversation::clock::format_hhmm) {
                Some(time) => format!("{AGENT_BADGE} {time}"),
                None => AGENT_BADGE.to_owned(),
            }
        }
    };
    let mut lines = entry.content.lines();
    let first = lines.next().unwrap_or_default();
    let mut out = format!("[{label}] {first}");
    for line in lines {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out
}

fn choices(prompt: Prompt) -> Vec<&'static str> {
    match prompt {
        Prompt::Intents => Intent::ALL.iter().map(|intent| intent.label()).collect(),
        Prompt::AgentHandoff => vec![HANDOFF_YES, HANDOFF_NO],
        Prompt::Feedback => vec!["👍 Helpful", "👎 Not helpful"],
    }
}

pub fn render_prompt(prompt: Prompt) -> String {
    choices(prompt)
        .iter()
        .enumerate()
        .map(|(index, label)| format!("  {}) {label}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Interpret a typed line against the prompt on screen.
///
/// A number picks the matching choice; anything else is free text.
pub fn parse_input(line: &str, prompt: Option<Prompt>) -> Input {
    let text = line.trim();
    if text.is_empty() {
        return Input::Nothing;
    }
    if text == "/quit" || text == "/exit" {
        return Input::Quit;
    }

    let choice = prompt.and_then(|prompt| {
        let index = text.parse::<usize>().ok()?.checked_sub(1)?;
        choice_msg(prompt, index)
    });
    Input::Send(choice.unwrap_or_else(|| Msg::Submit(text.to_owned())))
}

fn choice_msg(prompt: Prompt, index: usize) -> Option<Msg> {
    match prompt {
        Prompt::Intents => Intent::ALL.get(index).copied().map(Msg::IntentChosen),
        Prompt::AgentHandoff => [true, false].get(index).copied().map(Msg::HandoffChosen),
        Prompt::Feedback => [true, false].get(index).copied().map(Msg::FeedbackGiven),
    }
}
