//! Domain layer for the Starscope plugin.
//!
//! Core catalog types independent of Zellij APIs and rendering: the four
//! categories with their sort vocabulary, the entity records decoded from the
//! API, and the crate error types.
//!
//! # Organization
//!
//! - [`category`]: Categories, endpoint paths and sort options
//! - [`entities`]: Entity records and result-list decoding
//! - [`error`]: Error types and result alias
//!
//! # Examples
//!
//! ```
//! use starscope::domain::{Category, ResultList};
//!
//! let list = ResultList::decode(Category::Films, br#"{"results": []}"#)?;
//! assert!(list.is_empty());
//! # Ok::<(), starscope::StarscopeError>(())
//! ```

pub mod category;
pub mod entities;
pub mod error;

pub use category::{Category, SortOption, DEFAULT_SORT};
pub use entities::{resource_id, Film, Person, Planet, ResultList, Starship};
pub use error::{FetchFailure, Result, StarscopeError};
