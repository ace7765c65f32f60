//! One chat history entry.
//!
//! Bot replies flagged as markdown go through [`render_markdown_html`];
//! everything else is rendered as text so user and agent input is never
//! interpreted as HTML.

#[cfg(test)]
#[path = "message_bubble_test.rs"]
mod message_bubble_test;

use conversation::clock::format_hhmm;
use conversation::copy::AGENT_BADGE;
use conversation::{Entry, Sender};
use leptos::prelude::*;

use crate::util::markdown::render_markdown_html;

#[component]
pub fn MessageBubble(entry: Entry) -> impl IntoView {
    let class = bubble_class(entry.sender);
    let agent_time = agent_time_label(&entry);
    let is_agent = entry.sender == Sender::Agent;

    let body = if entry.markdown {
        let rendered = render_markdown_html(&entry.content);
        view! { <div class="message__body message__body--markdown" inner_html=rendered></div> }.into_any()
    } else {
        view! { <div class="message__body">{entry.content}</div> }.into_any()
    };

    view! {
        <div class=class>
            {is_agent
                .then(|| {
                    view! {
                        <div class="message__meta">
                            <span class="message__badge">{AGENT_BADGE}</span>
                            {agent_time.map(|time| view! { <span class="message__time">{time}</span> })}
                        </div>
                    }
                })}
            {body}
        </div>
    }
}

fn bubble_class(sender: Sender) -> String {
    format!("message message--{}", sender.as_str())
}

/// `HH:MM` label for agent messages that carry a parseable timestamp.
fn agent_time_label(entry: &Entry) -> Option<String> {
    if entry.sender != Sender::Agent {
        return None;
    }
    entry.timestamp.as_deref().and_then(format_hhmm)
}
