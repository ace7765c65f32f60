//! Quick-option intents and the deferred query they become.

#[cfg(test)]
#[path = "intent_test.rs"]
mod intent_test;

/// Intents offered as buttons under the greeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Emi,
    Balance,
    Loan,
}

impl Intent {
    pub const ALL: [Self; 3] = [Self::Emi, Self::Balance, Self::Loan];

    /// Button label, echoed into the history as the user's message.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Emi => "My EMI",
            Self::Balance => "My Account Balance",
            Self::Loan => "My Loan Amount",
        }
    }

    /// Value sent to the backend (chat message or `query_type`).
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::Emi => "emi",
            Self::Balance => "balance",
            Self::Loan => "loan",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|intent| intent.value() == value)
    }
}

/// The user's first request, held until OTP verification succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingQuery {
    Intent(Intent),
    Text(String),
}

impl PendingQuery {
    /// Message to send to the chat endpoint when replaying this query.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Intent(intent) => intent.value(),
            Self::Text(text) => text,
        }
    }
}

/// Where intent-button queries are answered once authenticated.
///
/// Free text always goes to `/chat`; only intent buttons can be routed to
/// the direct `/query` endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntentRoute {
    #[default]
    Chat,
    Direct,
}
