//! # conversation
//!
//! Client-side conversation controller for the assistant widget.
//!
//! DESIGN
//! ======
//! All session state (stage, history, pending query, credentials, prompts)
//! lives in one [`Session`] value. Front ends feed it [`Msg`] values (user
//! input, timer expiry, HTTP results, realtime pushes) and execute the
//! [`Effect`] values it returns. Nothing in this crate performs I/O or reads
//! a clock, so every flow is testable with plain values.

pub mod clock;
pub mod copy;
pub mod credentials;
pub mod history;
pub mod intent;
pub mod session;
pub mod stage;

pub use credentials::Credentials;
pub use history::{ChatHistory, Entry, Sender};
pub use intent::{Intent, IntentRoute, PendingQuery};
pub use session::{Awaiting, Effect, Msg, Prompt, Request, Session, SessionConfig, Timer, Timings};
pub use stage::Stage;
