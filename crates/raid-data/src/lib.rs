//! Data layer for the raid dashboard.
//!
//! Discovers raid reports on disk, parses them into player records, combines
//! records across sessions and produces the ranked slices the UI renders.

pub mod aggregator;
pub mod loader;
pub mod overview;
pub mod ranking;
pub mod scanner;

pub use raid_core as core;
