//! View model types representing renderable UI state.
//!
//! This module defines the data structures that bridge application state and
//! UI rendering. View models are computed from `AppState` and contain only the
//! information needed for display, already formatted for presentation.
//!
//! # Design
//!
//! View models follow a unidirectional data flow:
//! ```text
//! AppState → compute_viewmodel() → UIViewModel → render() → Terminal
//! ```
//!
//! Exactly one [`BodyView`] is produced per frame, so the loading indicator,
//! error panel, empty state and card grid can never show at the same time.

/// Complete view model for UI rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Title and tagline.
    pub header: HeaderInfo,
    /// One entry per category, in tab order.
    pub tabs: Vec<TabInfo>,
    /// Search field. `None` on the films tab.
    pub search_bar: Option<SearchBarInfo>,
    /// Sort control and, when open, its popover. `None` on the films tab.
    pub sort_control: Option<SortControlInfo>,
    /// Main content area.
    pub body: BodyView,
    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

/// One category tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    /// Tab label, e.g. `"Characters"`.
    pub label: String,
    /// Result count, present only when the category holds results.
    pub badge: Option<String>,
    pub is_active: bool,
}

/// Search field display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search text.
    pub query: String,
    /// Shown while the text is empty.
    pub placeholder: String,
    /// Whether keystrokes go to the field.
    pub is_focused: bool,
}

/// Sort control display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortControlInfo {
    /// Label of the active option.
    pub current_label: String,
    /// Popover entries when the menu is open.
    pub menu: Option<Vec<SortMenuItem>>,
}

/// One entry of the sort popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortMenuItem {
    pub label: String,
    /// The option currently applied.
    pub is_current: bool,
    /// The option under the cursor.
    pub is_highlighted: bool,
}

/// Content of the main area.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyView {
    /// A request is outstanding.
    Loading { message: String },
    /// The latest request failed.
    Error(ErrorPanel),
    /// The latest request succeeded with no entities.
    Empty(EmptyState),
    /// Entities laid out as cards.
    Cards(CardGrid),
}

/// Error message with its retry control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub message: String,
    /// Text of the retry control (`"Try Again"`).
    pub retry_label: String,
}

/// Empty state display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message, e.g. `"No characters found"`.
    pub message: String,
    /// Secondary line, empty when there is nothing to add.
    pub subtitle: String,
}

/// Visible window of the card grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CardGrid {
    /// Cards inside the window, row-major.
    pub cards: Vec<Card>,
    /// Cards per row.
    pub columns: usize,
    /// Width of one grid cell in columns.
    pub card_width: usize,
    /// Height of one grid cell in rows.
    pub card_height: usize,
    /// Index of the first visible card within the full list.
    pub first_index: usize,
    /// Number of cards in the full list.
    pub total: usize,
}

/// Lines reserved for a card's free text (the film crawl).
pub const CARD_TEXT_LINES: usize = 3;

/// Presentation of one entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Card {
    pub title: String,
    /// Short tag shown next to the title, e.g. `"ID: 1"` or `"EP 4"`.
    pub badge: Option<String>,
    /// Secondary line under the title.
    pub subtitle: Option<String>,
    pub bars: Vec<CardBar>,
    pub fields: Vec<CardField>,
    /// Free text clamped to [`CARD_TEXT_LINES`].
    pub text: Option<String>,
    pub tags: Vec<String>,
    /// Title character ranges matching the search text.
    pub highlight_ranges: Vec<(usize, usize)>,
    pub is_selected: bool,
}

impl Card {
    /// Rows the card occupies, borders included.
    #[must_use]
    pub fn height(&self) -> usize {
        2 + 1
            + usize::from(self.subtitle.is_some())
            + self.bars.len() * 2
            + self.fields.len()
            + if self.text.is_some() { CARD_TEXT_LINES } else { 0 }
            + usize::from(!self.tags.is_empty())
    }
}

/// Labelled percentage bar.
#[derive(Debug, Clone, PartialEq)]
pub struct CardBar {
    pub label: String,
    /// Value text printed right of the label, e.g. `"172 cm"`.
    pub value: String,
    /// Fill in `0.0..=100.0`.
    pub percent: f64,
}

/// Label/value row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub label: String,
    pub value: String,
}

impl CardField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_height_counts_every_section() {
        let card = Card {
            title: "X-wing".to_string(),
            subtitle: Some("T-65".to_string()),
            bars: vec![CardBar {
                label: "CREW".to_string(),
                value: "1".to_string(),
                percent: 0.0,
            }],
            fields: vec![CardField::new("Crew", "1"), CardField::new("Passengers", "0")],
            text: Some("crawl".to_string()),
            tags: vec!["EP 4".to_string()],
            ..Card::default()
        };
        assert_eq!(card.height(), 2 + 1 + 1 + 2 + 2 + CARD_TEXT_LINES + 1);
    }
}
