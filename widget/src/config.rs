//! Widget configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host page can tune the widget with `<meta name="chat-widget:*">`
//! tags; anything missing or unparsable falls back to the defaults, which
//! target the page's own origin.
//!
//! ```html
//! <meta name="chat-widget:base-url" content="/assistant">
//! <meta name="chat-widget:socket-path" content="/socket.io/">
//! <meta name="chat-widget:poll-ms" content="3000">
//! <meta name="chat-widget:greeting-ms" content="1000">
//! <meta name="chat-widget:reset-ms" content="1500">
//! <meta name="chat-widget:intent-route" content="direct">
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use conversation::{IntentRoute, SessionConfig, Timings};

#[cfg(feature = "csr")]
const META_PREFIX: &str = "chat-widget:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Prefix (or absolute origin) for the REST endpoints; empty means same origin.
    pub base_url: String,
    pub socket_path: String,
    pub timings: Timings,
    pub intent_route: IntentRoute,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            socket_path: wire::socketio::DEFAULT_PATH.to_owned(),
            timings: Timings::default(),
            intent_route: IntentRoute::Chat,
        }
    }
}

impl WidgetConfig {
    /// Read the configuration from the host page's meta tags.
    pub fn load() -> Self {
        #[cfg(feature = "csr")]
        {
            let document = web_sys::window().and_then(|w| w.document());
            Self::from_lookup(|name| {
                let selector = format!("meta[name=\"{META_PREFIX}{name}\"]");
                document
                    .as_ref()?
                    .query_selector(&selector)
                    .ok()
                    .flatten()?
                    .get_attribute("content")
            })
        }
        #[cfg(not(feature = "csr"))]
        {
            Self::default()
        }
    }

    /// Build a configuration from a `name -> value` lookup (names without the prefix).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |name: &str, fallback: Duration| {
            lookup(name)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map_or(fallback, Duration::from_millis)
        };

        Self {
            base_url: lookup("base-url").map(|s| s.trim().to_owned()).unwrap_or(defaults.base_url),
            socket_path: lookup("socket-path")
                .map(|s| s.trim().to_owned())
                .filter(|s| s.starts_with('/'))
                .unwrap_or(defaults.socket_path),
            timings: Timings {
                greeting: millis("greeting-ms", defaults.timings.greeting),
                reset: millis("reset-ms", defaults.timings.reset),
                poll: millis("poll-ms", defaults.timings.poll),
            },
            intent_route: match lookup("intent-route").as_deref().map(str::trim) {
                Some("direct") => IntentRoute::Direct,
                _ => defaults.intent_route,
            },
        }
    }

    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig { timings: self.timings, intent_route: self.intent_route }
    }

    /// WebSocket URL of the live-agent channel.
    ///
    /// An absolute `base_url` wins over the page origin.
    #[must_use]
    pub fn socket_url(&self, page_origin: &str) -> Option<String> {
        let origin = if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            self.base_url.as_str()
        } else {
            page_origin
        };
        wire::socketio::websocket_url(origin, &self.socket_path)
    }
}

/// `window.location.origin`, or an empty string outside a browser.
pub fn page_origin() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "csr"))]
    {
        String::new()
    }
}
