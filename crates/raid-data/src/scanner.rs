//! Report discovery.
//!
//! Reports live at `<root>/<session-dir>/report.json`; the session directory
//! name doubles as the session identifier.

use std::path::Path;

use chrono::{DateTime, Utc};
use raid_core::models::{Session, SessionOrder, REPORT_FILE_NAME};
use tracing::{debug, warn};

/// Find every report exactly two levels below `root` and return the sessions
/// in the requested order.
pub fn scan_reports(root: &Path, order: SessionOrder) -> Vec<Session> {
    if !root.exists() {
        warn!("Reports directory does not exist: {}", root.display());
        return Vec::new();
    }

    let mut sessions: Vec<Session> = walkdir::WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == REPORT_FILE_NAME)
        .filter_map(|entry| session_from_path(entry.path()))
        .collect();

    sort_sessions(&mut sessions, order);

    debug!(
        "Found {} reports under {}",
        sessions.len(),
        root.display()
    );
    sessions
}

/// Apply `order` to an already discovered list.
pub fn sort_sessions(sessions: &mut [Session], order: SessionOrder) {
    match order {
        SessionOrder::Oldest => sessions.sort_by(|a, b| a.path.cmp(&b.path)),
        SessionOrder::Newest => sessions.sort_by(|a, b| b.path.cmp(&a.path)),
        SessionOrder::Modified => sessions.sort_by(|a, b| {
            // Sessions without a timestamp sink to the bottom; ties fall back
            // to path order.
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.path.cmp(&b.path))
        }),
    }
}

fn session_from_path(path: &Path) -> Option<Session> {
    let id = path.parent()?.file_name()?.to_string_lossy().into_owned();
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from);

    Some(Session {
        id,
        path: path.to_path_buf(),
        modified,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
