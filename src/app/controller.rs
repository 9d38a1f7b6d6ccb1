//! Runtime loop glue between the event handler and the API gateway.
//!
//! [`Controller`] owns the [`AppState`] and a [`Gateway`] injected at
//! construction. Every event goes through [`handle_event`]; fetch actions are
//! handed to the gateway right away and the remaining actions (timers, pane
//! control) are returned for the plugin shim to execute. Tests drive the same
//! controller with a recording gateway.

use super::handler::{handle_event, Event};
use super::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::FetchFailure;
use crate::gateway::Gateway;

/// Application state plus the gateway its requests go through.
#[derive(Debug)]
pub struct Controller<G: Gateway> {
    state: AppState,
    gateway: G,
}

impl<G: Gateway> Controller<G> {
    /// Wires a state and a gateway together.
    pub const fn new(state: AppState, gateway: G) -> Self {
        Self { state, gateway }
    }

    /// Current application state.
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The injected gateway.
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Processes one event and dispatches any resulting request.
    ///
    /// A request the gateway refuses to send is completed immediately as a
    /// failure, so the view never stays in the loading state.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn handle(&mut self, event: &Event) -> Result<(bool, Vec<Action>)> {
        let (mut should_render, actions) = handle_event(&mut self.state, event)?;

        let mut remaining = Vec::with_capacity(actions.len());
        for action in actions {
            let Action::Fetch(request) = action else {
                remaining.push(action);
                continue;
            };

            if let Err(e) = self.gateway.dispatch(&request) {
                tracing::error!(seq = request.seq, error = %e, "failed to dispatch request");
                should_render |= self
                    .state
                    .apply_fetch_result(request.seq, Err(FetchFailure::new(e.to_string())));
            }
        }

        Ok((should_render, remaining))
    }
}
