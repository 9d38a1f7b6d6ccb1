//! Catalog categories and their sort-key vocabulary.
//!
//! A [`Category`] names one of the four entity kinds served by the API. Each
//! category knows its endpoint path, its tab label, its empty-state text and
//! the ordering keys the server accepts for it. Ordering keys are forwarded
//! verbatim as the `ordering` query parameter; the client never sorts.

use std::fmt;

/// One selectable entry of a category's sort menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    /// Menu text, e.g. `"Height: High"`.
    pub label: &'static str,
    /// Ordering key sent to the server, e.g. `"-height"`. Empty means server default.
    pub key: &'static str,
}

impl SortOption {
    const fn new(label: &'static str, key: &'static str) -> Self {
        Self { label, key }
    }
}

/// The "Default" entry listed first in every sort menu.
pub const DEFAULT_SORT: SortOption = SortOption::new("Default", "");

const PEOPLE_SORTS: &[SortOption] = &[
    DEFAULT_SORT,
    SortOption::new("Name A-Z", "name"),
    SortOption::new("Name Z-A", "-name"),
    SortOption::new("Height: Low", "height"),
    SortOption::new("Height: High", "-height"),
    SortOption::new("Mass: Low", "mass"),
    SortOption::new("Mass: High", "-mass"),
];

const PLANET_SORTS: &[SortOption] = &[
    DEFAULT_SORT,
    SortOption::new("Name A-Z", "name"),
    SortOption::new("Name Z-A", "-name"),
    SortOption::new("Pop: Low", "population"),
    SortOption::new("Pop: High", "-population"),
    SortOption::new("Size: Small", "diameter"),
    SortOption::new("Size: Large", "-diameter"),
];

const STARSHIP_SORTS: &[SortOption] = &[
    DEFAULT_SORT,
    SortOption::new("Name A-Z", "name"),
    SortOption::new("Name Z-A", "-name"),
    SortOption::new("Passengers: Low", "passengers"),
    SortOption::new("Passengers: High", "-passengers"),
    SortOption::new("Crew: Low", "crew"),
    SortOption::new("Crew: High", "-crew"),
];

/// Entity kind shown on one tab of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Category {
    /// Characters, served from `/people`.
    #[default]
    People,
    /// Planets, served from `/planets`.
    Planets,
    /// Films, served from `/films`. Never accepts query parameters.
    Films,
    /// Starships, served from `/starships`.
    Starships,
}

impl Category {
    /// All categories in tab order.
    pub const ALL: [Self; 4] = [Self::People, Self::Planets, Self::Films, Self::Starships];

    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::People => "/people",
            Self::Planets => "/planets",
            Self::Films => "/films",
            Self::Starships => "/starships",
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::People => "Characters",
            Self::Planets => "Planets",
            Self::Films => "Films",
            Self::Starships => "Starships",
        }
    }

    /// Message shown when a successful fetch returned no entities.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::People => "No characters found",
            Self::Planets => "No planets found",
            Self::Films => "No films found",
            Self::Starships => "No starships found",
        }
    }

    /// Placeholder text for the search field.
    #[must_use]
    pub fn search_placeholder(self) -> String {
        format!("Search {}...", self.label().to_lowercase())
    }

    /// Whether the endpoint accepts `search` and `ordering` parameters.
    ///
    /// Also decides whether the search field and sort menu are shown.
    #[must_use]
    pub const fn accepts_query_params(self) -> bool {
        !matches!(self, Self::Films)
    }

    /// Ordering key selected when the tab is entered.
    #[must_use]
    pub const fn default_sort_key(self) -> &'static str {
        DEFAULT_SORT.key
    }

    /// Sort menu entries, `Default` first. Empty for films.
    #[must_use]
    pub const fn sort_options(self) -> &'static [SortOption] {
        match self {
            Self::People => PEOPLE_SORTS,
            Self::Planets => PLANET_SORTS,
            Self::Starships => STARSHIP_SORTS,
            Self::Films => &[],
        }
    }

    /// Finds the menu entry for an ordering key.
    #[must_use]
    pub fn sort_option(self, key: &str) -> Option<SortOption> {
        self.sort_options().iter().copied().find(|option| option.key == key)
    }

    /// Position in [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::People => 0,
            Self::Planets => 1,
            Self::Films => 2,
            Self::Starships => 3,
        }
    }

    /// Next tab, wrapping to the first.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping to the last.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Parses an endpoint name such as `"people"` (used in request contexts).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }

    /// Endpoint name without the leading slash.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.path().trim_start_matches('/')
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn films_hide_query_controls() {
        assert!(!Category::Films.accepts_query_params());
        assert!(Category::Films.sort_options().is_empty());
        for category in [Category::People, Category::Planets, Category::Starships] {
            assert!(category.accepts_query_params());
        }
    }

    #[test]
    fn every_sort_menu_starts_with_default() {
        for category in [Category::People, Category::Planets, Category::Starships] {
            let options = category.sort_options();
            assert_eq!(options[0], DEFAULT_SORT);
            assert_eq!(options.len(), 7);
        }
    }

    #[test]
    fn people_sort_labels_map_to_server_keys() {
        let people = Category::People;
        let key = |label: &str| {
            people
                .sort_options()
                .iter()
                .find(|o| o.label == label)
                .map(|o| o.key)
        };
        assert_eq!(key("Height: Low"), Some("height"));
        assert_eq!(key("Height: High"), Some("-height"));
        assert_eq!(key("Mass: High"), Some("-mass"));
    }

    #[test]
    fn descending_keys_pair_with_ascending_ones() {
        for category in Category::ALL {
            for option in category.sort_options().iter().filter(|o| o.key.starts_with('-')) {
                let ascending = &option.key[1..];
                assert!(category.sort_option(ascending).is_some(), "{}", option.key);
            }
        }
    }

    #[test]
    fn tab_navigation_wraps() {
        assert_eq!(Category::Starships.next(), Category::People);
        assert_eq!(Category::People.previous(), Category::Starships);
        assert_eq!(Category::Planets.next(), Category::Films);
    }

    #[test]
    fn names_round_trip_through_from_name() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.name()), Some(category));
        }
        assert_eq!(Category::from_name("vehicles"), None);
    }

    #[test]
    fn placeholder_uses_lowercase_label() {
        assert_eq!(Category::People.search_placeholder(), "Search characters...");
    }
}
