mod backend;
mod clock;
mod config;
mod error;
mod socket;
mod state;
mod term;

use std::time::Duration;

use clap::Parser;
use conversation::{Effect, Msg, Prompt, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing_subscriber::EnvFilter;

use crate::backend::Backend;
use crate::config::Cli;
use crate::error::CliError;
use crate::socket::SocketHandle;
use crate::state::StateFile;
use crate::term::Input;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = StateFile::new(cli.state_file.clone());
    let credentials = store.load()?;
    let backend = Backend::new(&cli.base_url)?;

    let (events, mut inbox) = unbounded_channel::<Msg>();
    let socket = if cli.no_socket {
        SocketHandle::default()
    } else {
        socket::spawn_socket(cli.socket_url()?, events.clone())
    };
    tracing::info!(base_url = %cli.base_url, authenticated = credentials.authenticated, "chat session starting");

    let mut session = Session::new(cli.session_config(), credentials, clock::now_iso());
    let runner = Runner { backend, store, socket, events };
    let mut screen = Screen::default();

    runner.apply(&mut session, Msg::Started);
    screen.refresh(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(CliError::Stdin)? else {
                    break;
                };
                match term::parse_input(&line, session.prompt()) {
                    Input::Send(msg) => runner.apply(&mut session, msg),
                    Input::Quit => break,
                    Input::Nothing => {}
                }
            }
            Some(msg) = inbox.recv() => runner.apply(&mut session, msg),
        }
        screen.refresh(&session);
    }

    Ok(())
}

/// Executes session effects with tokio tasks; results come back through `events`.
struct Runner {
    backend: Backend,
    store: StateFile,
    socket: SocketHandle,
    events: UnboundedSender<Msg>,
}

impl Runner {
    fn apply(&self, session: &mut Session, msg: Msg) {
        for effect in session.update(msg) {
            self.run(effect);
        }
    }

    fn run(&self, effect: Effect) {
        match effect {
            Effect::Request(request) => {
                let backend = self.backend.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let _ = events.send(backend.perform(request).await);
                });
            }
            Effect::Schedule { timer, after } => {
                let events = self.events.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = events.send(Msg::TimerFired(timer));
                });
            }
            Effect::PersistCredentials(credentials) => {
                if let Err(error) = self.store.save(&credentials) {
                    tracing::warn!(error = %error, "credentials not saved");
                }
            }
            Effect::JoinRoom(customer_id) => {
                if !self.socket.send(&wire::realtime::join_customer_room(&customer_id)) {
                    tracing::debug!(%customer_id, "live-agent socket disabled, room join skipped");
                }
            }
            Effect::StartPolling(interval) => {
                tracing::info!(interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX), "polling agent messages");
                let store = self.store.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(100)));
                    ticker.tick().await;
                    loop {
                        ticker.tick().await;
                        let credentials = store.load().unwrap_or_else(|error| {
                            tracing::warn!(error = %error, "state file unreadable");
                            conversation::Credentials::default()
                        });
                        if events.send(Msg::PollTick(credentials)).is_err() {
                            return;
                        }
                    }
                });
            }
        }
    }
}

/// Tracks what has been printed so each refresh only prints what is new.
#[derive(Default)]
struct Screen {
    printed: usize,
    prompt: Option<Prompt>,
    loading: bool,
}

impl Screen {
    fn refresh(&mut self, session: &Session) {
        let entries = session.history().entries();
        let fresh = &entries[self.printed.min(entries.len())..];
        for entry in fresh {
            println!("{}", term::render_entry(entry));
        }
        self.printed = entries.len();

        let prompt = session.prompt();
        if prompt != self.prompt || (!fresh.is_empty() && prompt.is_some()) {
            if let Some(prompt) = prompt {
                println!("{}", term::render_prompt(prompt));
            }
            self.prompt = prompt;
        }

        let loading = session.is_loading();
        if loading && !self.loading {
            println!("  ...");
        }
        self.loading = loading;
    }
}
