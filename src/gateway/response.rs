//! Request context round-trip and response classification.
//!
//! The host hands a web response back together with the context map the
//! request was sent with. [`RequestContext`] is what we put in that map: the
//! sequence number, the category and, when a span was active, its trace ids.
//! [`completion_event`] turns status, body and context into the
//! [`Event::FetchCompleted`] the handler understands.

use crate::app::Event;
use crate::domain::{Category, FetchFailure, ResultList};
use crate::observability::TraceContext;
use std::collections::BTreeMap;

const SEQ_KEY: &str = "starscope.seq";
const CATEGORY_KEY: &str = "starscope.category";
const TRACE_ID_KEY: &str = "starscope.trace_id";
const PARENT_SPAN_KEY: &str = "starscope.parent_span_id";

/// Longest body that is shown to the user verbatim.
const MAX_PLAIN_MESSAGE_CHARS: usize = 200;

/// Correlation data attached to an outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub seq: u64,
    pub category: Category,
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Encodes the context as the host's string map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::from([
            (SEQ_KEY.to_string(), self.seq.to_string()),
            (CATEGORY_KEY.to_string(), self.category.name().to_string()),
        ]);
        if let Some(trace) = &self.trace {
            map.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            map.insert(PARENT_SPAN_KEY.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map. `None` if the map was not produced by
    /// [`RequestContext::to_map`], e.g. a response to some other request.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let seq = map.get(SEQ_KEY)?.parse().ok()?;
        let category = Category::from_name(map.get(CATEGORY_KEY)?)?;
        let trace = match (map.get(TRACE_ID_KEY), map.get(PARENT_SPAN_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };
        Some(Self {
            seq,
            category,
            trace,
        })
    }
}

/// Classifies a finished web request.
///
/// 2xx bodies are decoded as the category's result envelope; anything else
/// becomes a [`FetchFailure`] worded by [`failure_message`]. Returns `None`
/// for responses whose context is not ours.
#[must_use]
pub fn completion_event(
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> Option<Event> {
    let Some(request) = RequestContext::from_map(context) else {
        tracing::debug!(status, "ignoring web response without request context");
        return None;
    };

    let _span = tracing::debug_span!(
        "fetch_completed",
        seq = request.seq,
        category = %request.category,
        status,
        trace_id = request.trace.as_ref().map_or("", |t| t.trace_id.as_str()),
    )
    .entered();

    let outcome = if (200..300).contains(&status) {
        ResultList::decode_for_display(request.category, body)
    } else {
        let message = failure_message(status, body);
        tracing::warn!(status, message = %message, "request failed");
        Err(FetchFailure::new(message))
    };

    Some(Event::FetchCompleted {
        seq: request.seq,
        outcome,
    })
}

/// Human-readable message for a non-2xx response.
///
/// Prefers the `detail` field of a JSON error document, then a short
/// plain-text body, then a generic status line.
#[must_use]
pub fn failure_message(status: u16, body: &[u8]) -> String {
    if let Ok(serde_json::Value::Object(document)) = serde_json::from_slice(body) {
        if let Some(serde_json::Value::String(detail)) = document.get("detail") {
            if !detail.trim().is_empty() {
                return detail.trim().to_string();
            }
        }
        return FetchFailure::status(status).message;
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    let is_plain = !text.is_empty()
        && text.chars().count() <= MAX_PLAIN_MESSAGE_CHARS
        && !text.starts_with('<')
        && !text.contains('\n');

    if is_plain {
        text.to_string()
    } else {
        FetchFailure::status(status).message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context(seq: u64, category: Category) -> BTreeMap<String, String> {
        RequestContext {
            seq,
            category,
            trace: None,
        }
        .to_map()
    }

    #[test]
    fn context_round_trips_with_trace() {
        let original = RequestContext {
            seq: 42,
            category: Category::Starships,
            trace: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };
        assert_eq!(RequestContext::from_map(&original.to_map()), Some(original));
    }

    #[test]
    fn foreign_context_is_ignored() {
        assert!(completion_event(200, b"{}", &BTreeMap::new()).is_none());
    }

    #[test]
    fn success_decodes_for_the_context_category() {
        let body = br#"{"count": 1, "results": [{"title": "A New Hope", "episode_id": 4}]}"#;
        let event = completion_event(200, body, &context(3, Category::Films)).unwrap();
        let Event::FetchCompleted { seq, outcome } = event else {
            panic!("unexpected event");
        };
        assert_eq!(seq, 3);
        assert_eq!(outcome.unwrap().len(), 1);
    }

    #[test]
    fn detail_field_becomes_the_message() {
        let body = br#"{"detail": "Invalid or missing API key"}"#;
        assert_eq!(failure_message(401, body), "Invalid or missing API key");
    }

    #[test]
    fn structured_detail_falls_back_to_status() {
        let body = br#"{"detail": [{"loc": ["query"], "msg": "bad"}]}"#;
        assert_eq!(failure_message(422, body), "Request failed with status code 422");
    }

    #[test]
    fn short_text_body_is_shown_verbatim() {
        assert_eq!(failure_message(400, b"Network Error"), "Network Error");
    }

    #[test]
    fn html_body_falls_back_to_status() {
        let body = b"<html><body>Bad Gateway</body></html>";
        assert_eq!(failure_message(502, body), "Request failed with status code 502");
        assert_eq!(failure_message(500, b""), "Request failed with status code 500");
    }

    #[test]
    fn undecodable_success_body_is_a_failure() {
        let event = completion_event(200, b"not json", &context(1, Category::People)).unwrap();
        let Event::FetchCompleted { outcome, .. } = event else {
            panic!("unexpected event");
        };
        assert!(outcome.unwrap_err().message.starts_with("Invalid response:"));
    }
}
