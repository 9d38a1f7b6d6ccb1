//! Catalog entity records and the server's result envelope.
//!
//! Entities are read-only snapshots decoded straight from the API. Every field
//! is kept as the server sends it (numbers included, since the API reports
//! values like `"unknown"` or `"1,000"`); display code decides how to present
//! them. Missing fields decode to empty values so a partial payload still
//! renders. The canonical resource `url` is the only stable identity.

use super::category::Category;
use super::error::{FetchFailure, Result};
use serde::{Deserialize, Serialize};

/// A character from `/people`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    /// Film resource URLs. Opaque references, never resolved.
    pub films: Vec<String>,
    pub url: String,
}

/// A planet from `/planets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    pub name: String,
    pub climate: String,
    pub terrain: String,
    pub population: String,
    pub diameter: String,
    pub gravity: String,
    pub rotation_period: String,
    pub url: String,
}

/// A film from `/films`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Film {
    pub title: String,
    pub episode_id: u32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub url: String,
}

/// A starship from `/starships`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub crew: String,
    pub passengers: String,
    pub hyperdrive_rating: String,
    pub starship_class: String,
    pub cost_in_credits: String,
    pub length: String,
    pub url: String,
}

/// Server wrapper around one page of results.
#[derive(Debug, Clone, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    count: Option<u64>,
    results: Vec<T>,
}

/// An ordered list of entities for one category, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultList {
    People(Vec<Person>),
    Planets(Vec<Planet>),
    Films(Vec<Film>),
    Starships(Vec<Starship>),
}

impl ResultList {
    /// An empty list for the given category.
    #[must_use]
    pub const fn empty(category: Category) -> Self {
        match category {
            Category::People => Self::People(Vec::new()),
            Category::Planets => Self::Planets(Vec::new()),
            Category::Films => Self::Films(Vec::new()),
            Category::Starships => Self::Starships(Vec::new()),
        }
    }

    /// Decodes a `{count, results}` envelope for the given category.
    ///
    /// # Errors
    ///
    /// Returns [`StarscopeError::Decode`](super::StarscopeError::Decode) if the
    /// body is not a valid envelope for that category.
    pub fn decode(category: Category, body: &[u8]) -> Result<Self> {
        fn results<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<Vec<T>> {
            let envelope: Envelope<T> = serde_json::from_slice(body)?;
            tracing::debug!(
                server_count = ?envelope.count,
                returned = envelope.results.len(),
                "decoded result envelope"
            );
            Ok(envelope.results)
        }

        Ok(match category {
            Category::People => Self::People(results(body)?),
            Category::Planets => Self::Planets(results(body)?),
            Category::Films => Self::Films(results(body)?),
            Category::Starships => Self::Starships(results(body)?),
        })
    }

    /// Decodes an envelope, reducing any failure to a [`FetchFailure`].
    ///
    /// # Errors
    ///
    /// Returns a failure with an `"Invalid response: ..."` message.
    pub fn decode_for_display(
        category: Category,
        body: &[u8],
    ) -> std::result::Result<Self, FetchFailure> {
        Self::decode(category, body)
            .map_err(|e| FetchFailure::new(format!("Invalid response: {e}")))
    }

    /// Category the list belongs to.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::People(_) => Category::People,
            Self::Planets(_) => Category::Planets,
            Self::Films(_) => Category::Films,
            Self::Starships(_) => Category::Starships,
        }
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::People(items) => items.len(),
            Self::Planets(items) => items.len(),
            Self::Films(items) => items.len(),
            Self::Starships(items) => items.len(),
        }
    }

    /// Whether the list holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last non-empty path segment of a resource URL, e.g. `"12"` for
/// `https://swapi.dev/api/starships/12/`.
#[must_use]
pub fn resource_id(url: &str) -> &str {
    url.split('/').filter(|segment| !segment.is_empty()).next_back().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE_BODY: &str = r#"{
        "count": 2,
        "results": [
            {"name": "Luke Skywalker", "height": "172", "mass": "77",
             "hair_color": "blond", "eye_color": "blue", "birth_year": "19BBY",
             "gender": "male", "films": ["https://swapi.dev/api/films/1/"],
             "url": "https://swapi.dev/api/people/1/"},
            {"name": "Leia Organa", "url": "https://swapi.dev/api/people/5/"}
        ]
    }"#;

    #[test]
    fn decodes_people_in_server_order() {
        let list = ResultList::decode(Category::People, PEOPLE_BODY.as_bytes()).unwrap();
        let ResultList::People(people) = &list else {
            panic!("expected people, got {list:?}");
        };
        assert_eq!(people[0].name, "Luke Skywalker");
        assert_eq!(people[1].name, "Leia Organa");
        assert_eq!(people[1].height, "");
        assert!(people[1].films.is_empty());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn envelope_without_count_is_accepted() {
        let list = ResultList::decode(Category::Films, br#"{"results": []}"#).unwrap();
        assert_eq!(list, ResultList::empty(Category::Films));
        assert!(list.is_empty());
    }

    #[test]
    fn missing_results_is_a_display_failure() {
        let failure = ResultList::decode_for_display(Category::Planets, br#"{"detail": "x"}"#)
            .unwrap_err();
        assert!(failure.message.starts_with("Invalid response:"));
    }

    #[test]
    fn resource_id_ignores_trailing_slash() {
        assert_eq!(resource_id("https://swapi.dev/api/starships/12/"), "12");
        assert_eq!(resource_id("https://swapi.dev/api/films/3"), "3");
        assert_eq!(resource_id(""), "");
    }
}
