//! Starscope: a Zellij plugin for browsing the Star Wars catalog API.
//!
//! Starscope shows four entity categories (characters, planets, films and
//! starships) as tabs of cards, with server-side search and ordering:
//! - Tabs with per-category result counts
//! - Debounced search and a sort popover, both forwarded to the server
//! - Latest-request-wins fetching: stale responses are dropped
//! - Loading indicator, empty states, and an error panel with retry
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, debounce, sequence guard         │
//! │  - Controller with injected gateway                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                    │
//! ┌───────────────────────┐   ┌───────────────────────┐
//! │ UI Layer (ui/)        │   │ Gateway (gateway/)    │
//! │ - Card templates      │   │ - URL + credentials   │
//! │ - Components, theming │   │ - Host web requests   │
//! └───────────────────────┘   └───────────────────────┘
//!         │                                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure                │
//! │  - Categories, sort options, entities, errors       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to a local OTLP file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/starscope.wasm" {
//!         api_url "http://localhost:8000/api/v1"
//!         api_key "dev-api-key-change-in-production"
//!         search_debounce_ms "300"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! `api_url` and `api_key` fall back to the `STARSCOPE_API_URL` and
//! `STARSCOPE_API_KEY` variables at build time, then to the local defaults.
//!
//! # Example
//!
//! ```rust
//! use starscope::app::{Action, Controller, FetchRequest};
//! use starscope::gateway::Gateway;
//! use starscope::{initialize, Config, Event};
//! use zellij_tile::prelude::PermissionType;
//!
//! #[derive(Default)]
//! struct Recorder(Vec<FetchRequest>);
//!
//! impl Gateway for Recorder {
//!     fn dispatch(&mut self, request: &FetchRequest) -> starscope::Result<()> {
//!         self.0.push(request.clone());
//!         Ok(())
//!     }
//! }
//!
//! let mut controller = Controller::new(initialize(&Config::default()), Recorder::default());
//! controller.handle(&Event::PermissionsResult { granted: vec![PermissionType::WebAccess] })?;
//! assert_eq!(controller.gateway().0[0].path(), "/people");
//! # Ok::<(), starscope::StarscopeError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Controller, Event, InputMode};
pub use domain::{Category, FetchFailure, Result, StarscopeError};
pub use ui::Theme;

use gateway::endpoint::{DEFAULT_API_KEY, DEFAULT_API_URL};
use gateway::ApiEndpoint;
use std::collections::BTreeMap;

/// Debounce window applied when `search_debounce_ms` is not set.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base endpoint of the catalog API, without trailing slash.
    pub api_url: String,

    /// Value sent in the `X-API-Key` header.
    pub api_key: String,

    /// Quiet period after the last search keystroke before a request is
    /// sent. `0` sends one request per keystroke.
    pub search_debounce_ms: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to the host home.
    pub theme_file: Option<String>,

    /// Tracing filter directive, e.g. `info` or `starscope=debug`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: build_default(option_env!("STARSCOPE_API_URL"), DEFAULT_API_URL),
            api_key: build_default(option_env!("STARSCOPE_API_KEY"), DEFAULT_API_KEY),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

fn build_default(from_build: Option<&'static str>, fallback: &str) -> String {
    from_build
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Empty values count as unset. An unparseable `search_debounce_ms` is
    /// logged and replaced by the default.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use starscope::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("api_url".to_string(), "https://swapi.example/api/".to_string()),
    ///     ("search_debounce_ms".to_string(), "0".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "https://swapi.example/api");
    /// assert_eq!(config.search_debounce_ms, 0);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let search_debounce_ms = get("search_debounce_ms").map_or(
            defaults.search_debounce_ms,
            |raw| {
                parse_debounce_ms(&raw).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "using default search debounce");
                    defaults.search_debounce_ms
                })
            },
        );

        Self {
            api_url: get("api_url")
                .unwrap_or(defaults.api_url)
                .trim_end_matches('/')
                .to_string(),
            api_key: get("api_key").unwrap_or(defaults.api_key),
            search_debounce_ms,
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Endpoint the gateway talks to.
    #[must_use]
    pub fn endpoint(&self) -> ApiEndpoint {
        ApiEndpoint::new(&self.api_url, &self.api_key)
    }

    /// Debounce window in seconds, as the host timer expects it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn debounce_seconds(&self) -> f64 {
        self.search_debounce_ms as f64 / 1000.0
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    /// Failures are logged and fall through to the next source.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(file) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(file)) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %file, error = %e, "failed to load theme file"),
            }
        }

        if let Some(name) = &self.theme_name {
            match Theme::from_name(name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %name, "unknown theme, using default"),
            }
        }

        Theme::default()
    }
}

/// Parses a millisecond count for the search debounce.
///
/// # Errors
///
/// Returns [`StarscopeError::Config`] if the value is not a non-negative integer.
pub fn parse_debounce_ms(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| StarscopeError::Config(format!("search_debounce_ms {raw:?}: {e}")))
}

/// Builds the initial application state from configuration.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, debounce_ms = config.search_debounce_ms, "initializing starscope");
    AppState::new(config.load_theme(), config.debounce_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_zellij(&map(&[("api_key", "  "), ("trace_level", "")]));
        assert_eq!(config.api_key, Config::default().api_key);
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn bad_debounce_falls_back() {
        let config = Config::from_zellij(&map(&[("search_debounce_ms", "soon")]));
        assert_eq!(config.search_debounce_ms, DEFAULT_SEARCH_DEBOUNCE_MS);
        assert!(matches!(
            parse_debounce_ms("-1"),
            Err(StarscopeError::Config(_))
        ));
    }

    #[test]
    fn debounce_is_converted_to_seconds() {
        let config = Config::from_zellij(&map(&[("search_debounce_ms", "250")]));
        assert!((config.debounce_seconds() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut custom = Theme::default();
        custom.name = "from-file".to_string();
        write!(file, "{}", toml::to_string(&custom).unwrap()).unwrap();

        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("theme_file", file.path().to_str().unwrap()),
        ]));
        assert_eq!(config.load_theme().name, "from-file");
    }

    #[test]
    fn missing_theme_file_falls_back_to_name() {
        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("theme_file", "/definitely/not/here.toml"),
        ]));
        assert_eq!(config.load_theme().name, "catppuccin-latte");
    }

    #[test]
    fn initialize_starts_on_people() {
        let state = initialize(&Config::default());
        assert_eq!(state.category, Category::People);
        assert!((state.debounce_seconds - 0.3).abs() < f64::EPSILON);
    }
}
