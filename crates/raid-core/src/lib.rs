//! Shared domain types for the raid dashboard.
//!
//! Holds the player/session model, the dashboard catalog, error types,
//! CLI settings and number formatting used by every other crate.

pub mod catalog;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
