//! Fixed bot lines.

pub const GREETING: &str = "Hello! I am your financial assistant. You can ask me about your EMI, account balance, or loan details. You can also select an option below.";
pub const ASK_ACCOUNT_ID: &str = "Understood. To proceed, please enter your Account ID:";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const OTP_SEND_NETWORK_ERROR: &str = "A network error occurred while sending the OTP.";
pub const OTP_VERIFY_NETWORK_ERROR: &str = "A network error occurred while verifying the OTP.";
pub const FETCH_FAILED: &str = "Sorry, I couldn't fetch that information.";
pub const NETWORK_ERROR: &str = "A network error occurred.";
pub const OFFER_AGENT: &str = "Would you like me to connect you with a live agent?";
pub const CONNECTING_AGENT: &str = "Connecting you with an agent...";
pub const AGENT_CONNECTED: &str = "An agent will assist you shortly.";
pub const AGENT_CONNECT_FAILED: &str = "Could not connect to agent. Please try again later.";
pub const CONTINUE_WITH_BOT: &str = "Okay, let me know if you need anything else.";
pub const FEEDBACK_THANKS: &str = "Thank you for your feedback!";
pub const FEEDBACK_LOGGED: &str = "Your conversation has been logged for review.";
pub const ANYTHING_ELSE: &str = "Is there anything else I can help you with?";

pub const HANDOFF_YES: &str = "Yes, connect with agent";
pub const HANDOFF_NO: &str = "No, continue with bot";
pub const AGENT_BADGE: &str = "Live Agent";
