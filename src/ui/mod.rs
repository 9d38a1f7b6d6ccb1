//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → Canvas → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`cards`]: Per-category card templates
//! - [`scale`]: Percentage bars from display strings
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Frame buffer, truncation, wrapping and highlighting
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//!
//! # Example
//!
//! ```rust
//! use starscope::app::AppState;
//! use starscope::ui::{render_to_string, Theme};
//!
//! let state = AppState::new(Theme::default(), 0.3);
//! let frame = render_to_string(&state, 24, 80);
//! assert!(frame.contains("STAR WARS EXPLORER"));
//! ```

pub mod cards;
pub mod components;
pub mod helpers;
pub mod renderer;
pub mod scale;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    BodyView, Card, CardGrid, EmptyState, ErrorPanel, FooterInfo, HeaderInfo, SearchBarInfo,
    SortControlInfo, TabInfo, UIViewModel,
};
