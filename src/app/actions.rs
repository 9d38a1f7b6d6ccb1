//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never performs I/O. After each event it returns a list of
//! [`Action`]s describing what should happen next: an outbound catalog
//! request, a debounce timer, a permission prompt, or hiding the plugin pane.
//! The [`Controller`](crate::app::Controller) routes fetches to its gateway
//! and the plugin shim executes the rest.
//!
//! # Example
//!
//! ```rust
//! use starscope::app::{Action, FetchRequest};
//! use starscope::domain::Category;
//!
//! let action = Action::Fetch(FetchRequest {
//!     seq: 1,
//!     category: Category::People,
//!     params: Default::default(),
//! });
//! assert!(matches!(action, Action::Fetch(_)));
//! ```

use super::fetch::FetchRequest;

/// Commands representing side effects to be executed outside the handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sends one request to the API gateway.
    ///
    /// The request carries the sequence number its completion must echo back.
    Fetch(FetchRequest),

    /// Starts a one-shot timer; its expiry is reported as
    /// [`Event::DebounceElapsed`](crate::app::Event::DebounceElapsed).
    ScheduleDebounce {
        /// Timer length in seconds.
        seconds: f64,
    },

    /// Asks the host for web access again, after an earlier denial.
    RequestPermission,

    /// Hides the plugin pane.
    CloseFocus,
}
