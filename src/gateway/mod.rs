//! API gateway: turns [`FetchRequest`]s into outbound HTTP calls.
//!
//! The application layer only ever sees the [`Gateway`] trait. The plugin
//! uses [`ZellijGateway`], which goes through the host's `web_request`
//! facility; completions arrive later as `WebRequestResult` events and are
//! turned back into [`Event::FetchCompleted`](crate::app::Event::FetchCompleted)
//! by [`response::completion_event`]. Tests substitute a recording gateway.
//!
//! # Modules
//!
//! - [`endpoint`]: Base URL, credential header and URL construction
//! - [`response`]: Request context round-trip and response classification
//! - [`zellij`]: Host-backed implementation

pub mod endpoint;
pub mod response;
pub mod zellij;

pub use endpoint::ApiEndpoint;
pub use response::{completion_event, failure_message, RequestContext};
pub use zellij::ZellijGateway;

use crate::app::FetchRequest;
use crate::domain::error::Result;

/// Sends catalog requests on behalf of the application.
///
/// Dispatch is fire-and-forget: the completion is delivered back to the
/// application as an event carrying the request's sequence number.
pub trait Gateway {
    /// Starts one request.
    ///
    /// # Errors
    ///
    /// Returns [`StarscopeError::Gateway`](crate::StarscopeError::Gateway) if the
    /// request could not be sent at all.
    fn dispatch(&mut self, request: &FetchRequest) -> Result<()>;
}
