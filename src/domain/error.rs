//! Error types for the Starscope plugin.
//!
//! [`StarscopeError`] is the crate-wide error enum and [`Result`] the matching
//! alias. [`FetchFailure`] is the one failure users ever see: every network,
//! HTTP-status or decoding problem on the way back from the API collapses into
//! a single human-readable message shown in the error panel.

use thiserror::Error;

/// A failed catalog fetch, reduced to the message shown in the error panel.
///
/// The view controller never inspects status codes or error kinds; it only
/// displays [`FetchFailure::message`] and offers a retry.
///
/// # Examples
///
/// ```
/// use starscope::domain::FetchFailure;
///
/// let failure = FetchFailure::new("Network Error");
/// assert_eq!(failure.to_string(), "Network Error");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchFailure {
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl FetchFailure {
    /// Creates a failure carrying the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Failure for a non-success HTTP status with no better description.
    #[must_use]
    pub fn status(code: u16) -> Self {
        Self::new(format!("Request failed with status code {code}"))
    }
}

/// The main error type for Starscope operations.
///
/// Most variants wrap errors from external crates via `#[from]`; the string
/// variants describe plugin-level problems.
#[derive(Debug, Error)]
pub enum StarscopeError {
    /// A catalog request failed and should be surfaced to the user.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchFailure),

    /// A JSON document could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The gateway could not dispatch a request.
    #[error("Gateway error: {0}")]
    Gateway(String),
}

/// A specialized `Result` type for Starscope operations.
pub type Result<T> = std::result::Result<T, StarscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failure_reads_like_an_http_client_message() {
        assert_eq!(
            FetchFailure::status(404).message,
            "Request failed with status code 404"
        );
    }

    #[test]
    fn fetch_failure_converts_into_crate_error() {
        let err: StarscopeError = FetchFailure::new("Network Error").into();
        assert_eq!(err.to_string(), "Fetch failed: Network Error");
    }
}
