//! Sandbox filesystem helpers.
//!
//! Inside the Zellij plugin sandbox the host filesystem is mounted under
//! `/host`, so user-facing paths (data directory, theme files) have to be
//! mapped onto that mount.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
