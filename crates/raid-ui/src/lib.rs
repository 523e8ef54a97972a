//! Terminal UI layer for the raid dashboard.
//!
//! Provides themes, the header and bar-chart components, the session
//! selector, ranking tables, the scrolling dashboard body and the
//! application event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod selector_view;
pub mod table_view;
pub mod themes;

pub use raid_core as core;
