//! Report parsing.
//!
//! [`read_report`] is the strict parser; [`load_session`] and
//! [`load_sessions`] wrap it so that a broken file turns into a warning and
//! an empty player list instead of an error.

use std::path::Path;

use raid_core::error::{DashboardError, Result};
use raid_core::models::{LoadedSession, PlayerRecord, Session, SessionLoadError, PLAYERS_KEY};
use tracing::{debug, warn};

/// Result of loading one session: its players plus an optional warning.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub loaded: LoadedSession,
    pub warning: Option<SessionLoadError>,
}

/// Every discovered session after loading, with the warnings collected on
/// the way.
#[derive(Debug, Clone, Default)]
pub struct ReportSet {
    pub sessions: Vec<LoadedSession>,
    pub warnings: Vec<SessionLoadError>,
}

impl ReportSet {
    /// Session identifiers in listing order.
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|s| s.session.id.clone()).collect()
    }
}

/// Parse the report at `path` into player records.
///
/// A document without a `"players"` key yields an empty list.
pub fn read_report(path: &Path) -> Result<Vec<PlayerRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let document: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| DashboardError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let invalid = |reason: String| DashboardError::InvalidReport {
        path: path.to_path_buf(),
        reason,
    };

    let object = document
        .as_object()
        .ok_or_else(|| invalid("top-level value is not an object".to_string()))?;

    let Some(players) = object.get(PLAYERS_KEY) else {
        return Ok(Vec::new());
    };

    let entries = players
        .as_array()
        .ok_or_else(|| invalid(format!("\"{PLAYERS_KEY}\" is not an array")))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            PlayerRecord::from_json(entry)
                .map_err(|reason| invalid(format!("player #{i}: {reason}")))
        })
        .collect()
}

/// Load one session, tagging every record with the session identifier.
///
/// Never fails: a broken report produces zero players and a warning.
pub fn load_session(session: &Session) -> LoadOutcome {
    match read_report(&session.path) {
        Ok(mut players) => {
            for player in &mut players {
                player.sessions.insert(session.id.clone());
            }
            debug!(
                "Session {}: {} player entries",
                session.id,
                players.len()
            );
            LoadOutcome {
                loaded: LoadedSession {
                    session: session.clone(),
                    players,
                },
                warning: None,
            }
        }
        Err(e) => {
            warn!("Could not load {}: {}", session.path.display(), e);
            LoadOutcome {
                loaded: LoadedSession {
                    session: session.clone(),
                    players: Vec::new(),
                },
                warning: Some(SessionLoadError {
                    session: session.id.clone(),
                    path: session.path.clone(),
                    message: e.to_string(),
                }),
            }
        }
    }
}

/// Load every session in order, collecting warnings.
pub fn load_sessions(sessions: &[Session]) -> ReportSet {
    let mut set = ReportSet::default();
    for session in sessions {
        let outcome = load_session(session);
        set.sessions.push(outcome.loaded);
        set.warnings.extend(outcome.warning);
    }
    debug!(
        "Loaded {} sessions ({} with warnings)",
        set.sessions.len(),
        set.warnings.len()
    );
    set
}

// ── Tests ─────────────────────────────────────────────────────────────────────
