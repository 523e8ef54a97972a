//! Cached report store for the dashboard runtime.
//!
//! Reports are scanned and parsed once; callers use
//! [`DataManager::get_data`] to obtain the cached [`ReportSet`] and
//! [`DataManager::reload`] to re-read the reports directory from disk.

use std::path::{Path, PathBuf};

use raid_core::models::SessionOrder;
use raid_data::loader::{load_sessions, ReportSet};
use raid_data::scanner::scan_reports;

// ── DataManager ───────────────────────────────────────────────────────────────

/// Holds every loaded session until an explicit reload.
///
/// # Example
/// ```no_run
/// use raid_runtime::core::models::SessionOrder;
/// use raid_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new("reports", SessionOrder::Oldest);
/// println!("sessions: {}", mgr.get_data(false).sessions.len());
/// ```
pub struct DataManager {
    /// Directory holding one sub-directory per raid session.
    reports_dir: PathBuf,
    /// Order applied to discovered sessions.
    order: SessionOrder,
    /// Most recently loaded reports.
    cache: Option<ReportSet>,
}

impl DataManager {
    pub fn new(reports_dir: impl Into<PathBuf>, order: SessionOrder) -> Self {
        Self {
            reports_dir: reports_dir.into(),
            order,
            cache: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the loaded reports, reading them from disk on first use or when
    /// `force_refresh` is set.
    pub fn get_data(&mut self, force_refresh: bool) -> &ReportSet {
        if force_refresh || self.cache.is_none() {
            let fresh = self.fetch_fresh();
            tracing::debug!(
                sessions = fresh.sessions.len(),
                warnings = fresh.warnings.len(),
                "report cache updated"
            );
            return self.cache.insert(fresh);
        }

        tracing::debug!("returning cached reports");
        self.cache.get_or_insert_with(ReportSet::default)
    }

    /// Re-read every report from disk.
    pub fn reload(&mut self) -> &ReportSet {
        tracing::info!(dir = %self.reports_dir.display(), "reloading reports");
        self.get_data(true)
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn fetch_fresh(&self) -> ReportSet {
        let sessions = scan_reports(&self.reports_dir, self.order);
        load_sessions(&sessions)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
