#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;

/// Step of the guided conversation.
///
/// Variants are ordered; a session only ever moves to a later stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Waiting for the first intent, typed or clicked.
    #[default]
    Greeting,
    /// Intent captured; waiting for the account ID.
    AwaitingAccountId,
    /// OTP dispatched; waiting for the code.
    AwaitingOtp,
    /// Verified; every input goes to the chat endpoint.
    Chat,
}

impl Stage {
    /// Numeric position in the flow (0..=3).
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::Greeting => 0,
            Self::AwaitingAccountId => 1,
            Self::AwaitingOtp => 2,
            Self::Chat => 3,
        }
    }

    #[must_use]
    pub fn is_authenticated(self) -> bool {
        self == Self::Chat
    }

    /// Placeholder shown in the input box for this stage.
    #[must_use]
    pub fn input_hint(self) -> &'static str {
        match self {
            Self::Greeting => "Ask about your EMI, balance or loan...",
            Self::AwaitingAccountId => "Enter your Account ID",
            Self::AwaitingOtp => "Enter the OTP you received",
            Self::Chat => "Type your question...",
        }
    }
}
