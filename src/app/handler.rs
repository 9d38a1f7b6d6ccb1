//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! permission results, timer expiries and request completions, translating
//! them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, timers, web responses)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `SelectCategory`, `NextCategory`, `PreviousCategory`, `KeyDown`, `KeyUp`
//! - **Search**: `FocusSearch`, `BlurSearch`, `SubmitSearch`, `Char`, `Backspace`, `DebounceElapsed`
//! - **Sorting**: `ToggleSortMenu`, `SortMenuUp`, `SortMenuDown`, `SortMenuConfirm`, `SelectSortKey`
//! - **System**: `PermissionsResult`, `FetchCompleted`, `Retry`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use starscope::app::{handle_event, Action, AppState, Event};
//! use starscope::ui::Theme;
//! use zellij_tile::prelude::PermissionType;
//!
//! let mut state = AppState::new(Theme::default(), 0.3);
//! let (_, actions) = handle_event(
//!     &mut state,
//!     &Event::PermissionsResult { granted: vec![PermissionType::WebAccess] },
//! )?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), starscope::StarscopeError>(())
//! ```

use super::fetch::FetchRequest;
use super::modes::InputMode;
use crate::app::{Action, AppState, WebAccess};
use crate::domain::error::Result;
use crate::domain::{Category, FetchFailure, ResultList};
use zellij_tile::prelude::PermissionType;

/// Message shown when the user refuses web access.
pub const PERMISSION_DENIED_MESSAGE: &str = "Web access permission denied";

/// Events triggered by user input, timers, or request completions.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Activates a tab. Resets search text and ordering key.
    SelectCategory(Category),
    /// Activates the tab to the right (wraps).
    NextCategory,
    /// Activates the tab to the left (wraps).
    PreviousCategory,

    /// Moves the card selection forward by one (wraps to the first card).
    KeyDown,
    /// Moves the card selection back by one (wraps to the last card).
    KeyUp,

    /// Gives the search field keyboard focus. Ignored on the films tab.
    FocusSearch,
    /// Returns focus to the card grid, keeping the search text.
    BlurSearch,
    /// Dispatches the pending search immediately instead of waiting for the
    /// debounce window, then leaves the search field.
    SubmitSearch,
    /// Appends a character to the search text.
    Char(char),
    /// Removes the last character from the search text.
    Backspace,
    /// One debounce timer expired.
    DebounceElapsed,

    /// Opens or closes the sort popover.
    ToggleSortMenu,
    /// Moves the sort popover highlight up (wraps).
    SortMenuUp,
    /// Moves the sort popover highlight down (wraps).
    SortMenuDown,
    /// Applies the highlighted sort option.
    SortMenuConfirm,
    /// Applies an ordering key directly.
    SelectSortKey(String),

    /// Re-issues the failed request, or asks for web access again if it was
    /// denied. Only acted on while the error panel shows.
    Retry,

    /// Hides the plugin pane.
    CloseFocus,

    /// Reports permissions granted after the permission prompt.
    ///
    /// The first catalog request waits for web access.
    PermissionsResult {
        /// Permissions granted by the user. Empty when the prompt was denied.
        granted: Vec<PermissionType>,
    },

    /// A request finished, successfully or not.
    FetchCompleted {
        /// Sequence number of the request this completes.
        seq: u64,
        /// Decoded result list or the message to show.
        outcome: std::result::Result<ResultList, FetchFailure>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the view needs a re-render together with the actions to run
/// in order. At most one [`Action::Fetch`] is emitted per event.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime contract uniform with
/// the controller and the plugin shim.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (should_render, actions) = route_event(state, event)?;
    Ok(gate_fetches(state, should_render, actions))
}

#[allow(clippy::too_many_lines)]
fn route_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::SelectCategory(category) => Ok(with_fetch(state.select_category(*category))),
        Event::NextCategory => {
            let next = state.category.next();
            Ok(with_fetch(state.select_category(next)))
        }
        Event::PreviousCategory => {
            let previous = state.category.previous();
            Ok(with_fetch(state.select_category(previous)))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::FocusSearch => {
            if !state.category.accepts_query_params() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::BlurSearch => {
            tracing::debug!(query = %state.search_text, "leaving search mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            state.input_mode = InputMode::Normal;
            if !state.search_dirty {
                return Ok((true, vec![]));
            }
            Ok(with_fetch(flush_search(state)))
        }
        Event::Char(c) => {
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.search_text.push(*c);
            tracing::trace!(query = %state.search_text, char = %c, "search text updated");
            Ok(search_edited(state))
        }
        Event::Backspace => {
            if !state.input_mode.is_search() || state.search_text.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok(search_edited(state))
        }
        Event::DebounceElapsed => {
            state.pending_debounce = state.pending_debounce.saturating_sub(1);
            if state.pending_debounce > 0 || !state.search_dirty {
                return Ok((false, vec![]));
            }
            tracing::debug!(query = %state.search_text, "debounce window elapsed");
            Ok(with_fetch(flush_search(state)))
        }
        Event::ToggleSortMenu => {
            if !state.category.accepts_query_params() {
                return Ok((false, vec![]));
            }
            state.input_mode = if state.input_mode.is_sort_menu_open() {
                InputMode::Normal
            } else {
                let highlighted = state
                    .category
                    .sort_options()
                    .iter()
                    .position(|option| option.key == state.sort_key)
                    .unwrap_or(0);
                InputMode::SortMenu { highlighted }
            };
            Ok((true, vec![]))
        }
        Event::SortMenuUp | Event::SortMenuDown => {
            let InputMode::SortMenu { highlighted } = state.input_mode else {
                return Ok((false, vec![]));
            };
            let len = state.category.sort_options().len().max(1);
            let highlighted = if *event == Event::SortMenuDown {
                (highlighted + 1) % len
            } else {
                (highlighted + len - 1) % len
            };
            state.input_mode = InputMode::SortMenu { highlighted };
            Ok((true, vec![]))
        }
        Event::SortMenuConfirm => {
            let InputMode::SortMenu { highlighted } = state.input_mode else {
                return Ok((false, vec![]));
            };
            let Some(option) = state.category.sort_options().get(highlighted).copied() else {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            };
            tracing::debug!(label = option.label, key = option.key, "sort option chosen");
            Ok(with_fetch(state.select_sort_key(option.key)))
        }
        Event::SelectSortKey(key) => Ok(with_fetch(state.select_sort_key(key))),
        Event::Retry => {
            if state.error_message.is_none() {
                tracing::debug!("retry ignored, no error showing");
                return Ok((false, vec![]));
            }
            if state.web_access == WebAccess::Denied {
                tracing::debug!("retry asks for web access again");
                return Ok((false, vec![Action::RequestPermission]));
            }
            state.retry().map_or_else(
                || {
                    tracing::debug!("retry ignored, nothing was requested yet");
                    Ok((false, vec![]))
                },
                |request| {
                    tracing::debug!(seq = request.seq, "retrying failed request");
                    Ok((true, vec![Action::Fetch(request)]))
                },
            )
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::PermissionsResult { granted } => {
            tracing::debug!(permissions = ?granted, "permissions result");

            if !granted.contains(&PermissionType::WebAccess) {
                tracing::warn!("web access denied, catalog cannot load");
                state.web_access = WebAccess::Denied;
                state.loading = false;
                state.error_message = Some(PERMISSION_DENIED_MESSAGE.to_string());
                return Ok((true, vec![]));
            }

            if state.web_access == WebAccess::Granted {
                return Ok((false, vec![]));
            }
            state.web_access = WebAccess::Granted;
            Ok((true, vec![Action::Fetch(state.issue_fetch())]))
        }
        Event::FetchCompleted { seq, outcome } => {
            let applied = state.apply_fetch_result(*seq, outcome.clone());
            Ok((applied, vec![]))
        }
    }
}

/// Holds back or fails requests the host would not send.
///
/// Before the permission prompt is answered a request is dropped and stays
/// loading; the grant issues a fresh one for the current query. After a
/// denial every request completes at once with the permission failure.
fn gate_fetches(
    state: &mut AppState,
    mut should_render: bool,
    actions: Vec<Action>,
) -> (bool, Vec<Action>) {
    if state.web_access == WebAccess::Granted {
        return (should_render, actions);
    }

    let mut remaining = Vec::with_capacity(actions.len());
    for action in actions {
        let Action::Fetch(request) = action else {
            remaining.push(action);
            continue;
        };
        if state.web_access == WebAccess::Denied {
            tracing::debug!(seq = request.seq, "failing request, web access denied");
            should_render |= state.apply_fetch_result(
                request.seq,
                Err(FetchFailure::new(PERMISSION_DENIED_MESSAGE)),
            );
        } else {
            tracing::debug!(seq = request.seq, "holding request until web access is granted");
        }
    }
    (should_render, remaining)
}

/// Wraps an optional request into the handler's return shape.
fn with_fetch(request: Option<FetchRequest>) -> (bool, Vec<Action>) {
    (true, request.map(Action::Fetch).into_iter().collect())
}

/// Bookkeeping after the search text changed: either dispatch at once (no
/// debounce window) or arm one more timer.
fn search_edited(state: &mut AppState) -> (bool, Vec<Action>) {
    state.search_dirty = true;
    state.selected_index = 0;

    if state.debounce_seconds <= 0.0 {
        return with_fetch(flush_search(state));
    }

    state.pending_debounce += 1;
    (
        true,
        vec![Action::ScheduleDebounce {
            seconds: state.debounce_seconds,
        }],
    )
}

/// Issues a request for the current search text unless the latest request
/// already asks for exactly that.
fn flush_search(state: &mut AppState) -> Option<FetchRequest> {
    state.search_dirty = false;
    if state.latest_matches_current_query() {
        tracing::debug!(query = %state.search_text, "search unchanged since last request");
        return None;
    }
    Some(state.issue_fetch())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Person;
    use crate::ui::Theme;

    fn started(debounce: f64) -> (AppState, FetchRequest) {
        let mut state = AppState::new(Theme::default(), debounce);
        let (_, actions) = handle_event(
            &mut state,
            &Event::PermissionsResult {
                granted: vec![PermissionType::WebAccess],
            },
        )
        .unwrap();
        let [Action::Fetch(request)] = actions.as_slice() else {
            panic!("expected initial fetch, got {actions:?}");
        };
        let request = request.clone();
        (state, request)
    }

    fn fetches(actions: &[Action]) -> Vec<&FetchRequest> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Fetch(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn permission_grant_fetches_people_once() {
        let (mut state, request) = started(0.3);
        assert_eq!(request.category, Category::People);
        assert!(request.params.is_empty());

        let (_, actions) = handle_event(
            &mut state,
            &Event::PermissionsResult {
                granted: vec![PermissionType::WebAccess],
            },
        )
        .unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn permission_denial_shows_error() {
        let mut state = AppState::new(Theme::default(), 0.3);
        let (render, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: vec![] }).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.error_message.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
    }

    #[test]
    fn typing_schedules_one_timer_per_keystroke() {
        let (mut state, _) = started(0.3);
        handle_event(&mut state, &Event::FocusSearch).unwrap();

        for c in "Luke".chars() {
            let (_, actions) = handle_event(&mut state, &Event::Char(c)).unwrap();
            assert_eq!(actions, vec![Action::ScheduleDebounce { seconds: 0.3 }]);
        }
        assert_eq!(state.pending_debounce, 4);

        for _ in 0..3 {
            let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
            assert!(actions.is_empty());
        }
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        let sent = fetches(&actions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].search(), Some("Luke"));
    }

    #[test]
    fn zero_debounce_fetches_per_keystroke() {
        let (mut state, _) = started(0.0);
        handle_event(&mut state, &Event::FocusSearch).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Char('L')).unwrap();
        assert_eq!(fetches(&actions)[0].search(), Some("L"));
    }

    #[test]
    fn submit_flushes_and_later_timer_is_quiet() {
        let (mut state, _) = started(0.3);
        handle_event(&mut state, &Event::FocusSearch).unwrap();
        handle_event(&mut state, &Event::Char('R')).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert_eq!(fetches(&actions).len(), 1);
        assert_eq!(state.input_mode, InputMode::Normal);

        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn typing_back_to_the_sent_query_does_not_refetch() {
        let (mut state, initial) = started(0.3);
        state.apply_fetch_result(initial.seq, Ok(ResultList::People(vec![Person::default()])));
        handle_event(&mut state, &Event::FocusSearch).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();

        handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn keys_outside_search_mode_are_ignored() {
        let (mut state, _) = started(0.3);
        let (render, actions) = handle_event(&mut state, &Event::Char('a')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.search_text.is_empty());
    }

    #[test]
    fn films_have_no_search_or_sort() {
        let (mut state, _) = started(0.3);
        let (_, actions) =
            handle_event(&mut state, &Event::SelectCategory(Category::Films)).unwrap();
        assert!(fetches(&actions)[0].params.is_empty());

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        handle_event(&mut state, &Event::ToggleSortMenu).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn sort_menu_navigation_and_confirm() {
        let (mut state, _) = started(0.3);
        handle_event(&mut state, &Event::ToggleSortMenu).unwrap();
        assert_eq!(state.input_mode, InputMode::SortMenu { highlighted: 0 });

        handle_event(&mut state, &Event::SortMenuUp).unwrap();
        assert_eq!(state.input_mode, InputMode::SortMenu { highlighted: 6 });

        let (_, actions) = handle_event(&mut state, &Event::SortMenuConfirm).unwrap();
        assert_eq!(fetches(&actions)[0].ordering(), Some("-mass"));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn toggling_sort_menu_never_fetches() {
        let (mut state, _) = started(0.3);
        for _ in 0..2 {
            let (_, actions) = handle_event(&mut state, &Event::ToggleSortMenu).unwrap();
            assert!(actions.is_empty());
        }
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn tab_cycle_resets_query() {
        let (mut state, _) = started(0.3);
        state.search_text = "Luke".to_string();
        state.sort_key = "-height".to_string();

        let (_, actions) = handle_event(&mut state, &Event::NextCategory).unwrap();
        let sent = fetches(&actions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].category, Category::Planets);
        assert!(sent[0].params.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::PreviousCategory).unwrap();
        let sent = fetches(&actions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].category, Category::People);
        assert!(sent[0].params.is_empty());
    }

    #[test]
    fn category_switch_cancels_pending_search() {
        let (mut state, _) = started(0.3);
        handle_event(&mut state, &Event::FocusSearch).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        handle_event(&mut state, &Event::SelectCategory(Category::Starships)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.pending_debounce, 0);
    }

    #[test]
    fn stale_completion_does_not_render() {
        let (mut state, first) = started(0.3);
        handle_event(&mut state, &Event::SelectCategory(Category::Planets)).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::FetchCompleted {
                seq: first.seq,
                outcome: Ok(ResultList::empty(Category::People)),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.loading);
    }

    fn denied() -> AppState {
        let mut state = AppState::new(Theme::default(), 0.3);
        handle_event(&mut state, &Event::PermissionsResult { granted: vec![] }).unwrap();
        state
    }

    #[test]
    fn retry_after_denial_asks_for_permission_again() {
        let mut state = denied();
        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert_eq!(actions, vec![Action::RequestPermission]);
        assert_eq!(state.error_message.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
    }

    #[test]
    fn requests_fail_at_once_while_access_is_denied() {
        let mut state = denied();
        let (render, actions) =
            handle_event(&mut state, &Event::SelectCategory(Category::Planets)).unwrap();

        assert!(render);
        assert!(fetches(&actions).is_empty());
        assert_eq!(state.category, Category::Planets);
        assert!(!state.loading);
        assert_eq!(state.error_message.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
    }

    #[test]
    fn later_grant_recovers_after_denial() {
        let mut state = denied();
        handle_event(&mut state, &Event::SelectCategory(Category::Starships)).unwrap();

        let (_, actions) = handle_event(
            &mut state,
            &Event::PermissionsResult {
                granted: vec![PermissionType::WebAccess],
            },
        )
        .unwrap();
        let sent = fetches(&actions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].category, Category::Starships);
        assert!(state.loading);
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn requests_before_the_prompt_wait_for_the_grant() {
        let mut state = AppState::new(Theme::default(), 0.3);
        let (_, actions) =
            handle_event(&mut state, &Event::SelectCategory(Category::Planets)).unwrap();
        assert!(fetches(&actions).is_empty());
        assert!(state.loading);

        let (_, actions) = handle_event(
            &mut state,
            &Event::PermissionsResult {
                granted: vec![PermissionType::WebAccess],
            },
        )
        .unwrap();
        assert_eq!(fetches(&actions)[0].category, Category::Planets);
    }

    #[test]
    fn close_focus_emits_action() {
        let (mut state, _) = started(0.3);
        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
