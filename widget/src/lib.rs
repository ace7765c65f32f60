//! # widget
//!
//! Leptos + WASM chat widget for the financial assistant.
//!
//! The conversation itself lives in the `conversation` crate; this crate
//! renders a [`conversation::Session`] and runs the effects it requests:
//! REST calls through `gloo-net`, timers through `gloo-timers`, credentials
//! in `localStorage`, and the Socket.IO live-agent channel.
//!
//! Browser-only code is gated behind the `csr` feature so the crate still
//! builds (and its helpers still test) on the host.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod runtime;
pub mod util;

/// WASM entry point: install logging and mount the widget on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("chat widget starting");
    leptos::mount::mount_to_body(app::App);
}
