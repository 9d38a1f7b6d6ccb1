//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain and gateway layers. It implements
//! the event-driven architecture behind the catalog view.
//!
//! # Architecture
//!
//! ```text
//! Key / Timer / Web response → Event → handle_event → State mutations → Actions
//!                                 ↑                                        ↓
//!                                 └──── FetchCompleted ←── Gateway ←── Fetch
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Handler plus injected gateway
//! - [`fetch`]: Request descriptions and the sequence guard
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state machine
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod controller;
pub mod fetch;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use controller::Controller;
pub use fetch::{build_query, FetchRequest, FetchTracker, QueryParams};
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{AppState, WebAccess};
