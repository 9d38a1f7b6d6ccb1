//! Request descriptions and the latest-request-wins sequence guard.
//!
//! The view controller never talks to the network itself. Each state change
//! that needs data produces a [`FetchRequest`] describing exactly one outbound
//! call. The [`FetchTracker`] stamps requests with strictly increasing
//! sequence numbers and remembers which one is current, so a completion can
//! be matched against it and dropped if a newer request has been issued since.

use crate::domain::Category;
use std::collections::BTreeMap;

/// Query parameters of one request, in stable key order.
pub type QueryParams = BTreeMap<String, String>;

/// Builds the query parameters for a category, search text and ordering key.
///
/// `search` is included iff the text is non-empty, `ordering` iff the key is
/// non-empty. Films never receive parameters.
///
/// # Example
///
/// ```
/// use starscope::app::fetch::build_query;
/// use starscope::domain::Category;
///
/// let params = build_query(Category::People, "Luke", "-height");
/// assert_eq!(params.get("search").map(String::as_str), Some("Luke"));
/// assert_eq!(params.get("ordering").map(String::as_str), Some("-height"));
/// assert!(build_query(Category::Films, "Hope", "name").is_empty());
/// ```
#[must_use]
pub fn build_query(category: Category, search_text: &str, sort_key: &str) -> QueryParams {
    let mut params = QueryParams::new();
    if !category.accepts_query_params() {
        return params;
    }
    if !search_text.is_empty() {
        params.insert("search".to_string(), search_text.to_string());
    }
    if !sort_key.is_empty() {
        params.insert("ordering".to_string(), sort_key.to_string());
    }
    params
}

/// One outbound catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Sequence number assigned when the request was issued.
    pub seq: u64,
    /// Category whose endpoint is queried.
    pub category: Category,
    /// Query parameters (`search`, `ordering`).
    pub params: QueryParams,
}

impl FetchRequest {
    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.category.path()
    }

    /// Value of the `search` parameter, if sent.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.params.get("search").map(String::as_str)
    }

    /// Value of the `ordering` parameter, if sent.
    #[must_use]
    pub fn ordering(&self) -> Option<&str> {
        self.params.get("ordering").map(String::as_str)
    }

    /// Whether two requests ask the server for the same thing.
    #[must_use]
    pub fn same_query(&self, category: Category, params: &QueryParams) -> bool {
        self.category == category && &self.params == params
    }
}

/// Issues sequence numbers and tracks the most recently issued request.
#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    next_seq: u64,
    latest: Option<FetchRequest>,
}

impl FetchTracker {
    /// Creates a tracker that has issued nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_seq: 1,
            latest: None,
        }
    }

    /// Issues a new request, making it the latest.
    pub fn issue(&mut self, category: Category, params: QueryParams) -> FetchRequest {
        let seq = self.next_seq.max(1);
        self.next_seq = seq + 1;
        let request = FetchRequest {
            seq,
            category,
            params,
        };
        tracing::debug!(seq, category = %category, params = ?request.params, "issuing fetch");
        self.latest = Some(request.clone());
        request
    }

    /// Re-issues the latest request's category and parameters under a fresh
    /// sequence number. `None` if nothing was issued yet.
    pub fn reissue(&mut self) -> Option<FetchRequest> {
        let previous = self.latest.clone()?;
        Some(self.issue(previous.category, previous.params))
    }

    /// Whether a completion for `seq` belongs to the latest request.
    #[must_use]
    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.as_ref().is_some_and(|request| request.seq == seq)
    }

    /// The most recently issued request.
    #[must_use]
    pub const fn latest(&self) -> Option<&FetchRequest> {
        self.latest.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_send_no_parameters() {
        assert!(build_query(Category::People, "", "").is_empty());
    }

    #[test]
    fn films_drop_search_and_ordering() {
        assert!(build_query(Category::Films, "Empire", "-name").is_empty());
    }

    #[test]
    fn search_text_is_forwarded_verbatim() {
        let params = build_query(Category::Starships, "  X-wing ", "");
        assert_eq!(params.get("search").map(String::as_str), Some("  X-wing "));
        assert!(!params.contains_key("ordering"));
    }

    #[test]
    fn sequence_numbers_strictly_increase() {
        let mut tracker = FetchTracker::new();
        let a = tracker.issue(Category::People, QueryParams::new());
        let b = tracker.issue(Category::Planets, QueryParams::new());
        assert!(b.seq > a.seq);
        assert!(!tracker.is_latest(a.seq));
        assert!(tracker.is_latest(b.seq));
    }

    #[test]
    fn default_tracker_still_starts_at_one() {
        let mut tracker = FetchTracker::default();
        assert_eq!(tracker.issue(Category::People, QueryParams::new()).seq, 1);
    }

    #[test]
    fn reissue_keeps_query_and_bumps_sequence() {
        let mut tracker = FetchTracker::new();
        assert!(tracker.reissue().is_none());

        let params = build_query(Category::People, "Luke", "name");
        let first = tracker.issue(Category::People, params.clone());
        let retry = tracker.reissue().unwrap();
        assert!(retry.same_query(Category::People, &params));
        assert!(retry.seq > first.seq);
        assert!(tracker.is_latest(retry.seq));
    }

    #[test]
    fn nothing_is_latest_before_first_issue() {
        assert!(!FetchTracker::new().is_latest(0));
    }
}
