//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the catalog view: the active
//! category, the search text and ordering key, the loading and error flags,
//! one result list per category, and the request tracker that decides which
//! completion is allowed to update any of them.
//!
//! # State Components
//!
//! - **Query**: `category`, `search_text`, `sort_key`
//! - **Status**: `loading`, `error_message`
//! - **Results**: last successful list per category, in server order
//! - **Requests**: [`FetchTracker`] holding the latest issued request
//! - **Interaction**: input mode, selected card, pending debounce timers
//! - **Access**: whether the host allows web requests ([`WebAccess`])
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] projects the state into a
//! [`UIViewModel`]: tabs with count badges, the search and sort widgets (not
//! for films), and exactly one body: loading indicator, error panel, empty
//! state, or a window of the card grid centred on the selected card.
//!
//! # Example
//!
//! ```rust
//! use starscope::app::AppState;
//! use starscope::domain::Category;
//! use starscope::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), 0.3);
//! let request = state.issue_fetch();
//! assert_eq!(request.category, Category::People);
//! assert!(state.loading);
//! ```

use super::fetch::{build_query, FetchRequest, FetchTracker, QueryParams};
use super::modes::InputMode;
use crate::domain::{Category, FetchFailure, ResultList};
use crate::ui::cards;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, Card, CardGrid, EmptyState, ErrorPanel, FooterInfo, HeaderInfo, SearchBarInfo,
    SortControlInfo, SortMenuItem, TabInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::BTreeMap;

/// Narrowest card the grid will lay out before dropping a column.
const MIN_CARD_WIDTH: usize = 36;

/// Widest grid, matching a three-column desktop layout.
const MAX_GRID_COLUMNS: usize = 3;

/// Text of the error panel's retry control.
pub const RETRY_LABEL: &str = "Try Again";

/// Outcome of the host's web-access permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebAccess {
    /// Prompt not answered yet. Requests are held back until it is.
    #[default]
    Pending,
    Granted,
    /// Requests would be dropped by the host; each one fails at once.
    Denied,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Category whose tab is active.
    pub category: Category,

    /// Current search text. Always empty on the films tab.
    pub search_text: String,

    /// Current ordering key, possibly `-`-prefixed. Empty means server default.
    pub sort_key: String,

    /// Whether the latest request is still outstanding.
    pub loading: bool,

    /// Message of the latest failed request, cleared when a new one is issued.
    pub error_message: Option<String>,

    /// Last successful result list per category.
    pub results: BTreeMap<Category, ResultList>,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Index of the highlighted card within the current result list.
    pub selected_index: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Sequence numbers and the latest issued request.
    pub fetches: FetchTracker,

    /// Debounce timers scheduled but not yet expired.
    pub pending_debounce: usize,

    /// Whether the search text changed since the last dispatched request.
    pub search_dirty: bool,

    /// Debounce window in seconds; `0` dispatches on every keystroke.
    pub debounce_seconds: f64,

    /// Whether issued requests can actually reach the network.
    pub web_access: WebAccess,
}

impl AppState {
    /// Creates the initial state: people tab, empty query, no results.
    #[must_use]
    pub fn new(theme: Theme, debounce_seconds: f64) -> Self {
        let results = Category::ALL
            .into_iter()
            .map(|category| (category, ResultList::empty(category)))
            .collect();

        Self {
            category: Category::default(),
            search_text: String::new(),
            sort_key: Category::default().default_sort_key().to_string(),
            loading: false,
            error_message: None,
            results,
            input_mode: InputMode::Normal,
            selected_index: 0,
            theme,
            fetches: FetchTracker::new(),
            pending_debounce: 0,
            search_dirty: false,
            debounce_seconds: debounce_seconds.max(0.0),
            web_access: WebAccess::Pending,
        }
    }

    /// Result list held for a category.
    #[must_use]
    pub fn results_for(&self, category: Category) -> Option<&ResultList> {
        self.results.get(&category)
    }

    /// Number of entities held for a category.
    #[must_use]
    pub fn count_for(&self, category: Category) -> usize {
        self.results_for(category).map_or(0, ResultList::len)
    }

    /// Query parameters the current state would send.
    #[must_use]
    pub fn current_query(&self) -> QueryParams {
        build_query(self.category, &self.search_text, &self.sort_key)
    }

    /// Whether the latest request already asks for the current query and has
    /// not failed, so issuing another one would be redundant.
    #[must_use]
    pub fn latest_matches_current_query(&self) -> bool {
        self.error_message.is_none()
            && self
                .fetches
                .latest()
                .is_some_and(|latest| latest.same_query(self.category, &self.current_query()))
    }

    /// Enters the loading state and issues a request for the current query.
    pub fn issue_fetch(&mut self) -> FetchRequest {
        self.loading = true;
        self.error_message = None;
        self.search_dirty = false;
        let params = self.current_query();
        self.fetches.issue(self.category, params)
    }

    /// Re-issues the latest request unchanged, if the error panel is showing.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.error_message.is_none() {
            return None;
        }
        let request = self.fetches.reissue()?;
        self.loading = true;
        self.error_message = None;
        Some(request)
    }

    /// Switches category, resetting search text and ordering key.
    ///
    /// Returns the request to issue. Reselecting the active category only
    /// fetches when the reset actually changed the query.
    pub fn select_category(&mut self, category: Category) -> Option<FetchRequest> {
        let changed = category != self.category
            || !self.search_text.is_empty()
            || self.sort_key != category.default_sort_key();

        self.input_mode = InputMode::Normal;
        self.search_dirty = false;

        if !changed {
            tracing::debug!(category = %category, "category reselected, query unchanged");
            return None;
        }

        self.category = category;
        self.search_text.clear();
        self.sort_key = category.default_sort_key().to_string();
        self.selected_index = 0;
        Some(self.issue_fetch())
    }

    /// Applies an ordering key and closes the sort menu.
    ///
    /// Returns `None` when the key is already active (no redundant request)
    /// or the category has no sort menu.
    pub fn select_sort_key(&mut self, key: &str) -> Option<FetchRequest> {
        self.input_mode = InputMode::Normal;

        if !self.category.accepts_query_params() || self.category.sort_option(key).is_none() {
            tracing::debug!(category = %self.category, key, "ignoring unknown sort key");
            return None;
        }
        if self.sort_key == key {
            tracing::debug!(key, "sort key unchanged");
            return None;
        }

        self.sort_key = key.to_string();
        self.selected_index = 0;
        Some(self.issue_fetch())
    }

    /// Applies a completed request.
    ///
    /// Completions for anything but the latest issued request are discarded
    /// and leave the state untouched. Returns whether the state changed.
    pub fn apply_fetch_result(
        &mut self,
        seq: u64,
        outcome: Result<ResultList, FetchFailure>,
    ) -> bool {
        if !self.fetches.is_latest(seq) {
            tracing::debug!(
                seq,
                latest = ?self.fetches.latest().map(|r| r.seq),
                "discarding stale response"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(list) => {
                tracing::debug!(seq, category = %list.category(), count = list.len(), "results replaced");
                self.results.insert(list.category(), list);
                self.error_message = None;
                self.selected_index = 0;
            }
            Err(failure) => {
                tracing::debug!(seq, error = %failure, "fetch failed");
                self.error_message = Some(failure.message);
            }
        }
        true
    }

    /// Moves the card selection forward, wrapping to the first card.
    pub fn move_selection_down(&mut self) {
        let len = self.count_for(self.category);
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the card selection back, wrapping to the last card.
    pub fn move_selection_up(&mut self) {
        let len = self.count_for(self.category);
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Label of the active ordering key, e.g. `"Height: High"`.
    #[must_use]
    pub fn sort_label(&self) -> &'static str {
        self.category
            .sort_option(&self.sort_key)
            .map_or("Default", |option| option.label)
    }

    /// Computes a renderable view model for the given terminal size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: Self::compute_header(),
            tabs: self.compute_tabs(),
            search_bar: self.compute_search_bar(),
            sort_control: self.compute_sort_control(),
            body: self.compute_body(rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_header() -> HeaderInfo {
        HeaderInfo {
            title: "Star Wars Explorer".to_string(),
            subtitle: "EXPLORE THE GALAXY FAR, FAR AWAY".to_string(),
        }
    }

    fn compute_tabs(&self) -> Vec<TabInfo> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let count = self.count_for(category);
                TabInfo {
                    label: category.label().to_string(),
                    badge: (count > 0).then(|| count.to_string()),
                    is_active: category == self.category,
                }
            })
            .collect()
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        self.category.accepts_query_params().then(|| SearchBarInfo {
            query: self.search_text.clone(),
            placeholder: self.category.search_placeholder(),
            is_focused: self.input_mode.is_search(),
        })
    }

    fn compute_sort_control(&self) -> Option<SortControlInfo> {
        if !self.category.accepts_query_params() {
            return None;
        }

        let menu = match self.input_mode {
            InputMode::SortMenu { highlighted } => Some(
                self.category
                    .sort_options()
                    .iter()
                    .enumerate()
                    .map(|(idx, option)| SortMenuItem {
                        label: option.label.to_string(),
                        is_current: option.key == self.sort_key,
                        is_highlighted: idx == highlighted,
                    })
                    .collect(),
            ),
            _ => None,
        };

        Some(SortControlInfo {
            current_label: self.sort_label().to_string(),
            menu,
        })
    }

    fn compute_body(&self, rows: usize, cols: usize) -> BodyView {
        if self.loading {
            return BodyView::Loading {
                message: format!("Loading {}...", self.category.label().to_lowercase()),
            };
        }

        if let Some(message) = &self.error_message {
            return BodyView::Error(ErrorPanel {
                message: message.clone(),
                retry_label: RETRY_LABEL.to_string(),
            });
        }

        let Some(list) = self.results_for(self.category).filter(|list| !list.is_empty()) else {
            return BodyView::Empty(EmptyState {
                message: self.category.empty_message().to_string(),
                subtitle: if self.search_text.is_empty() {
                    String::new()
                } else {
                    format!("Nothing matches \"{}\"", self.search_text)
                },
            });
        };

        BodyView::Cards(self.compute_card_grid(list, rows, cols))
    }

    /// Lays out the card grid and keeps the selected card inside the window.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Pick the column count from the terminal width (1 to 3 columns)
    /// 2. Fit as many card rows as the space below the widgets allows
    /// 3. Centre the window on the selected card's row
    /// 4. Pull the window back when it would run past the last row
    fn compute_card_grid(&self, list: &ResultList, rows: usize, cols: usize) -> CardGrid {
        let mut cards = cards::project(list);
        let total = cards.len();

        let columns = (cols / MIN_CARD_WIDTH).clamp(1, MAX_GRID_COLUMNS);
        let card_width = (cols / columns).max(1);
        let card_height = cards.iter().map(Card::height).max().unwrap_or(1);

        let visible_rows = (self.calculate_available_rows(rows) / card_height).max(1);
        let total_rows = total.div_ceil(columns);
        let selected = self.selected_index.min(total.saturating_sub(1));
        let selected_row = selected / columns;

        let mut first_row = selected_row.saturating_sub(visible_rows / 2);
        if first_row + visible_rows > total_rows {
            first_row = total_rows.saturating_sub(visible_rows);
        }

        let start = first_row * columns;
        let end = (start + visible_rows * columns).min(total);

        let matcher = (!self.search_text.is_empty()).then(SkimMatcherV2::default);
        let visible: Vec<Card> = cards
            .drain(start..end)
            .enumerate()
            .map(|(offset, mut card)| {
                card.is_selected = start + offset == selected;
                if let Some(m) = matcher.as_ref() {
                    card.highlight_ranges = self.compute_highlight_ranges(&card.title, m);
                }
                card
            })
            .collect();

        CardGrid {
            cards: visible,
            columns,
            card_width,
            card_height,
            first_index: start,
            total,
        }
    }

    /// Character ranges of `text` matched by the search text, coalesced into
    /// contiguous `(start, end)` runs.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.search_text) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => "Type to search  Enter: search now  Esc: done".to_string(),
            InputMode::SortMenu { .. } => {
                "j/k: move  Enter: apply sort  Esc/s: close".to_string()
            }
            InputMode::Normal if self.error_message.is_some() && !self.loading => {
                "r: try again  Tab/h/l: switch tab  q: quit".to_string()
            }
            InputMode::Normal if self.category.accepts_query_params() => {
                "Tab/h/l: switch tab  j/k: browse  /: search  s: sort  q: quit".to_string()
            }
            InputMode::Normal => "Tab/h/l: switch tab  j/k: browse  q: quit".to_string(),
        };

        FooterInfo { keybindings }
    }

    /// Rows left for the card grid after the fixed chrome.
    ///
    /// Chrome is blank line, title, subtitle, tabs, border, footer border and
    /// footer (7 rows), plus the search box and sort line (4 rows) when shown.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        if self.category.accepts_query_params() {
            total_rows.saturating_sub(11)
        } else {
            total_rows.saturating_sub(7)
        }
    }
}
