//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Starscope library
//! and the Zellij plugin system. It translates host events into library
//! events, routes them through the [`Controller`], and executes the actions
//! that come back.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create the controller
//! 2. **Subscribe**: Register for Key, `WebRequestResult`, `Timer` and permission events
//! 3. **Permissions**: The first catalog request waits for `WebAccess`
//! 4. **Update**: Map events, delegate to the library layer
//! 5. **Render**: Call the library render function
//!
//! # Keybindings
//!
//! In normal mode:
//! - `Tab`/`l`/`Right`: Next tab, `Shift+Tab`/`h`/`Left`: previous tab
//! - `1`-`4`: Jump to a tab
//! - `j`/`Down`, `k`/`Up`: Move the card selection
//! - `/`: Focus search, `s`: open the sort menu
//! - `r`/`Enter`: Retry after an error (asks for web access again if it was denied)
//! - `q`/`Esc`: Close plugin
//!
//! In search mode:
//! - Printable keys: Type characters
//! - `Backspace`: Delete a character
//! - `Enter`: Search now and leave the field
//! - `Esc`: Leave the field
//!
//! In the sort menu:
//! - `j`/`k`/`Down`/`Up`: Move highlight
//! - `Enter`: Apply
//! - `Esc`/`s`: Close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use starscope::gateway::{completion_event, ZellijGateway};
use starscope::{Action, Category, Config, Controller, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper around the library controller.
struct State {
    controller: Controller<ZellijGateway>,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            controller: Controller::new(
                starscope::initialize(&config),
                ZellijGateway::new(config.endpoint()),
            ),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and state, requests web
    /// access and subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        starscope::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, "parsed configuration");
        self.controller = Controller::new(
            starscope::initialize(&config),
            ZellijGateway::new(config.endpoint()),
        );

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match completion_event(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: match status {
                        PermissionStatus::Granted => vec![PermissionType::WebAccess],
                        PermissionStatus::Denied => Vec::new(),
                    },
                }
            }
            _ => return false,
        };

        match self.controller.handle(&our_event) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        starscope::ui::render(self.controller.state(), rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        let mode = self.controller.state().input_mode;
        tracing::debug!(bare_key = ?key.bare_key, mode = ?mode, "key event");

        match mode {
            InputMode::Search => Some(match key.bare_key {
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::BlurSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
                _ => return None,
            }),
            InputMode::SortMenu { .. } => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::SortMenuDown,
                BareKey::Up | BareKey::Char('k') => Event::SortMenuUp,
                BareKey::Enter => Event::SortMenuConfirm,
                BareKey::Esc | BareKey::Char('s') => Event::ToggleSortMenu,
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => {
                    Event::PreviousCategory
                }
                BareKey::Tab | BareKey::Right | BareKey::Char('l') => Event::NextCategory,
                BareKey::Left | BareKey::Char('h') => Event::PreviousCategory,
                BareKey::Char(c @ '1'..='4') => {
                    let index = c as usize - '1' as usize;
                    Event::SelectCategory(Category::ALL[index])
                }
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('s') => Event::ToggleSortMenu,
                BareKey::Char('r') | BareKey::Enter => Event::Retry,
                BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Executes a non-fetch action returned from the controller.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::ScheduleDebounce { seconds } => set_timeout(*seconds),
            Action::RequestPermission => request_permission(&[PermissionType::WebAccess]),
            Action::CloseFocus => hide_self(),
            Action::Fetch(request) => {
                tracing::warn!(seq = request.seq, "fetch action reached the plugin shim");
            }
        }
    }
}
