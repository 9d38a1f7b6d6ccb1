//! Input mode state for the application.
//!
//! The input mode decides how keys are interpreted and which widget owns the
//! keyboard:
//! - **Normal**: tab switching, scrolling, retry, opening widgets
//! - **Search**: keystrokes edit the search text
//! - **SortMenu**: the sort popover is open and `j`/`k` move its highlight
//!
//! Films have neither a search field nor a sort menu, so only `Normal` is
//! reachable on that tab.
//!
//! # Example
//!
//! ```rust
//! use starscope::app::InputMode;
//!
//! let mode = InputMode::SortMenu { highlighted: 0 };
//! assert!(mode.is_sort_menu_open());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation mode.
    ///
    /// Available keybindings: tab/h/l (switch category), j/k (scroll),
    /// / (search), s (sort menu), r (retry after an error), q (quit).
    #[default]
    Normal,

    /// The search field has focus and receives every keystroke.
    Search,

    /// The sort popover is open.
    ///
    /// `highlighted` indexes the category's sort options; Enter selects it,
    /// Esc or s closes the menu without selecting.
    SortMenu {
        /// Index of the highlighted option.
        highlighted: usize,
    },
}

impl InputMode {
    /// Whether the search field owns the keyboard.
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search)
    }

    /// Whether the sort popover is open.
    #[must_use]
    pub const fn is_sort_menu_open(self) -> bool {
        matches!(self, Self::SortMenu { .. })
    }
}
