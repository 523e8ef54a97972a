//! Runtime layer for the raid dashboard.
//!
//! Owns the loaded reports and turns a selection into a renderable
//! [`dashboard::DashboardSnapshot`].

pub mod dashboard;
pub mod data_manager;

pub use raid_core as core;
pub use raid_data as data;
