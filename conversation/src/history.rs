//! Append-only chat history.
//!
//! The history is both what the widget renders and the context folded into
//! backend requests. Entries are never edited or removed once pushed.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use wire::http::{HistoryItem, TranscriptItem};

/// Author of a history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Bot,
    Agent,
}

impl Sender {
    /// Wire name (`"user"`, `"bot"`, `"agent"`), also used as the CSS class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
            Self::Agent => "agent",
        }
    }
}

/// A single history entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub sender: Sender,
    pub content: String,
    /// Server timestamp; only agent messages carry one.
    pub timestamp: Option<String>,
    /// Render `content` as Markdown. Only set on assistant replies.
    pub markdown: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatHistory {
    entries: Vec<Entry>,
}

impl ChatHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Sender::User, content.into(), None, false);
    }

    /// Plain bot notice (prompts, status lines).
    pub fn push_bot(&mut self, content: impl Into<String>) {
        self.push(Sender::Bot, content.into(), None, false);
    }

    /// Assistant reply rendered as Markdown.
    pub fn push_reply(&mut self, content: impl Into<String>) {
        self.push(Sender::Bot, content.into(), None, true);
    }

    pub fn push_agent(&mut self, content: impl Into<String>, timestamp: Option<String>) {
        self.push(Sender::Agent, content.into(), timestamp, false);
    }

    fn push(&mut self, sender: Sender, content: String, timestamp: Option<String>, markdown: bool) {
        self.entries.push(Entry { sender, content, timestamp, markdown });
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Whether an agent message with this text and timestamp is already present.
    #[must_use]
    pub fn has_agent_message(&self, content: &str, timestamp: Option<&str>) -> bool {
        self.entries.iter().any(|e| {
            e.sender == Sender::Agent && e.content == content && e.timestamp.as_deref() == timestamp
        })
    }

    /// `(sender, content)` pairs for the chat endpoint.
    #[must_use]
    pub fn to_chat_items(&self) -> Vec<HistoryItem> {
        self.entries
            .iter()
            .map(|e| HistoryItem { sender: e.sender.as_str().to_owned(), content: e.content.clone() })
            .collect()
    }

    /// Full transcript for the agent-handoff and summary endpoints.
    #[must_use]
    pub fn to_transcript(&self) -> Vec<TranscriptItem> {
        self.entries
            .iter()
            .map(|e| TranscriptItem {
                sender: e.sender.as_str().to_owned(),
                content: e.content.clone(),
                timestamp: e.timestamp.clone(),
            })
            .collect()
    }
}
