//! Base endpoint, credential and URL construction.

use crate::app::FetchRequest;
use std::collections::BTreeMap;

/// Base URL used when neither the plugin configuration nor the build sets one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Credential used when neither the plugin configuration nor the build sets one.
pub const DEFAULT_API_KEY: &str = "dev-api-key-change-in-production";

/// Header carrying the static credential.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Where and how to reach the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base_url: String,
    api_key: String,
}

impl ApiEndpoint {
    /// Creates an endpoint. A trailing `/` on the base URL is dropped.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a request: base, category path, then the percent-encoded
    /// query string if there are parameters.
    ///
    /// ```
    /// use starscope::app::build_query;
    /// use starscope::app::FetchTracker;
    /// use starscope::domain::Category;
    /// use starscope::gateway::ApiEndpoint;
    ///
    /// let endpoint = ApiEndpoint::new("http://localhost:8000/api/v1/", "key");
    /// let request = FetchTracker::new()
    ///     .issue(Category::People, build_query(Category::People, "Obi Wan", "-mass"));
    /// assert_eq!(
    ///     endpoint.url_for(&request),
    ///     "http://localhost:8000/api/v1/people?ordering=-mass&search=Obi%20Wan"
    /// );
    /// ```
    #[must_use]
    pub fn url_for(&self, request: &FetchRequest) -> String {
        let mut url = format!("{}{}", self.base_url, request.path());
        if request.params.is_empty() {
            return url;
        }

        let query = request
            .params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&query);
        url
    }

    /// Headers sent with every request.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (API_KEY_HEADER.to_string(), self.api_key.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ])
    }
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_API_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{build_query, FetchTracker};
    use crate::domain::Category;

    #[test]
    fn films_url_has_no_query_string() {
        let request = FetchTracker::new().issue(Category::Films, build_query(Category::Films, "x", "name"));
        assert_eq!(
            ApiEndpoint::default().url_for(&request),
            "http://localhost:8000/api/v1/films"
        );
    }

    #[test]
    fn reserved_characters_are_encoded() {
        let endpoint = ApiEndpoint::new("https://api.example.com", "k");
        let request = FetchTracker::new().issue(
            Category::Starships,
            build_query(Category::Starships, "A&B=C", ""),
        );
        assert_eq!(
            endpoint.url_for(&request),
            "https://api.example.com/starships?search=A%26B%3DC"
        );
    }

    #[test]
    fn credential_header_is_attached() {
        let headers = ApiEndpoint::new("http://x", "secret").headers();
        assert_eq!(headers.get(API_KEY_HEADER).map(String::as_str), Some("secret"));
    }
}
