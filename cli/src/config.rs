//! Command-line and environment configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use conversation::{IntentRoute, SessionConfig, Timings};

use crate::error::CliError;

#[derive(Parser, Debug, Clone)]
#[command(name = "chat-cli", about = "Talk to the financial assistant from a terminal")]
pub struct Cli {
    #[arg(long, env = "CHAT_BASE_URL", default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// JSON file holding the verified credentials between runs.
    #[arg(long, env = "CHAT_STATE_FILE", default_value = ".chat-cli-state.json")]
    pub state_file: PathBuf,

    #[arg(long, env = "CHAT_POLL_MS", default_value_t = 3000)]
    pub poll_ms: u64,

    /// Send intent choices to `/query` instead of `/chat`.
    #[arg(long, env = "CHAT_DIRECT_QUERIES", default_value_t = false)]
    pub direct_queries: bool,

    #[arg(long, default_value = wire::socketio::DEFAULT_PATH)]
    pub socket_path: String,

    /// Skip the live-agent socket and rely on polling alone.
    #[arg(long, default_value_t = false)]
    pub no_socket: bool,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        let timings = Timings { poll: Duration::from_millis(self.poll_ms.max(1)), ..Timings::default() };
        let intent_route = if self.direct_queries { IntentRoute::Direct } else { IntentRoute::Chat };
        SessionConfig { timings, intent_route }
    }

    pub fn socket_url(&self) -> Result<String, CliError> {
        wire::socketio::websocket_url(&self.base_url, &self.socket_path)
            .ok_or_else(|| CliError::InvalidBaseUrl(self.base_url.clone()))
    }
}
