use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::DashboardError;

/// File name every raid report carries inside its session directory.
pub const REPORT_FILE_NAME: &str = "report.json";

/// Name of the session-level summary row written by the report generator.
pub const TOTAL_ROW_NAME: &str = "Total";

/// Key under which a report lists its players.
pub const PLAYERS_KEY: &str = "players";

/// Key holding a player's display name.
pub const NAME_KEY: &str = "name";

/// Separator used when several session identifiers are shown in one cell.
pub const SESSION_SEPARATOR: &str = ", ";

// ── Session ───────────────────────────────────────────────────────────────────

/// One raid report discovered on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Display identifier, taken from the containing directory name.
    pub id: String,
    /// Full path of the report file.
    pub path: PathBuf,
    /// File modification time, when the filesystem reports one.
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

/// Ordering applied to discovered sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOrder {
    /// Ascending path order.
    Oldest,
    /// Descending path order. Directory names stand in for dates here, so
    /// this is only as good as the naming scheme.
    Newest,
    /// Newest file modification time first.
    Modified,
}

impl FromStr for SessionOrder {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "oldest" => Ok(SessionOrder::Oldest),
            "newest" => Ok(SessionOrder::Newest),
            "modified" => Ok(SessionOrder::Modified),
            other => Err(DashboardError::Config(format!(
                "unknown session order: {other}"
            ))),
        }
    }
}

impl SessionOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOrder::Oldest => "oldest",
            SessionOrder::Newest => "newest",
            SessionOrder::Modified => "modified",
        }
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// How the user picks the sessions that feed the working table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Every loaded session.
    All,
    /// Exactly one session.
    Single,
    /// An explicit subset of sessions.
    Multiple,
}

impl FromStr for SelectionMode {
    type Err = DashboardError;

    /// Case-insensitive construction from `"all"`, `"single"` or `"multiple"`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "all" => Ok(SelectionMode::All),
            "single" => Ok(SelectionMode::Single),
            "multiple" => Ok(SelectionMode::Multiple),
            other => Err(DashboardError::Config(format!(
                "unknown selection mode: {other}"
            ))),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl SelectionMode {
    /// Canonical lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::All => "all",
            SelectionMode::Single => "single",
            SelectionMode::Multiple => "multiple",
        }
    }

    /// Capitalised label for the UI.
    pub fn label(&self) -> &'static str {
        match self {
            SelectionMode::All => "All",
            SelectionMode::Single => "Single",
            SelectionMode::Multiple => "Multiple",
        }
    }

    /// The mode that follows this one when cycling through them.
    pub fn next(self) -> Self {
        match self {
            SelectionMode::All => SelectionMode::Single,
            SelectionMode::Single => SelectionMode::Multiple,
            SelectionMode::Multiple => SelectionMode::All,
        }
    }
}

/// The user's current session selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub mode: SelectionMode,
    /// Chosen session identifiers. Ignored in [`SelectionMode::All`]; in
    /// [`SelectionMode::Single`] only the first entry counts.
    pub sessions: Vec<String>,
}

impl Selection {
    pub fn all() -> Self {
        Self {
            mode: SelectionMode::All,
            sessions: Vec::new(),
        }
    }

    pub fn single(id: impl Into<String>) -> Self {
        Self {
            mode: SelectionMode::Single,
            sessions: vec![id.into()],
        }
    }

    pub fn multiple<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: SelectionMode::Multiple,
            sessions: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `id` is explicitly chosen.
    pub fn contains(&self, id: &str) -> bool {
        self.sessions.iter().any(|s| s == id)
    }

    /// Add `id` when absent, remove it when present.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.sessions.iter().position(|s| s == id) {
            self.sessions.remove(pos);
        } else {
            self.sessions.push(id.to_string());
        }
    }
}

// ── PlayerRecord ──────────────────────────────────────────────────────────────

/// One player's statistics, either from a single report or summed across
/// several.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    /// Numeric counters keyed by snake_case field name.
    #[serde(default)]
    pub stats: BTreeMap<String, f64>,
    /// Every non-numeric field of the source entry, kept verbatim.
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
    /// Identifiers of the sessions this record was drawn from.
    #[serde(default)]
    pub sessions: BTreeSet<String>,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder used by loaders and tests to attach a counter.
    pub fn with_stat(mut self, key: impl Into<String>, value: f64) -> Self {
        self.stats.insert(key.into(), value);
        self
    }

    /// Builder attaching a session identifier.
    pub fn with_session(mut self, id: impl Into<String>) -> Self {
        self.sessions.insert(id.into());
        self
    }

    /// Build a record from one entry of a report's `"players"` array.
    ///
    /// Numbers land in [`Self::stats`], everything else except `name` in
    /// [`Self::extra`]. Returns the reason when the entry is unusable.
    pub fn from_json(entry: &serde_json::Value) -> Result<Self, String> {
        let object = entry
            .as_object()
            .ok_or_else(|| "player entry is not an object".to_string())?;

        let name = object
            .get(NAME_KEY)
            .and_then(|v| v.as_str())
            .ok_or_else(|| "player entry has no string \"name\"".to_string())?;

        let mut record = PlayerRecord::new(name);
        for (key, value) in object {
            if key == NAME_KEY {
                continue;
            }
            match value.as_f64() {
                Some(n) => {
                    record.stats.insert(key.clone(), n);
                }
                None => {
                    record.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(record)
    }

    /// Value of a numeric column; absent columns read as zero.
    pub fn value(&self, column: &str) -> f64 {
        self.stats.get(column).copied().unwrap_or(0.0)
    }

    /// Whether this is the report's summary row rather than a player.
    pub fn is_total(&self) -> bool {
        self.name == TOTAL_ROW_NAME
    }

    /// Sorted, de-duplicated session identifiers joined with `", "`.
    pub fn session_label(&self) -> String {
        self.sessions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(SESSION_SEPARATOR)
    }

    /// Fold `other` into `self`: counters are summed, non-numeric fields keep
    /// their first value, session sets are unioned.
    pub fn absorb(&mut self, other: &PlayerRecord) {
        for (key, value) in &other.stats {
            *self.stats.entry(key.clone()).or_insert(0.0) += value;
        }
        for (key, value) in &other.extra {
            self.extra
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self.sessions.extend(other.sessions.iter().cloned());
    }
}

// ── Load results ──────────────────────────────────────────────────────────────

/// Non-fatal warning for a session whose report could not be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLoadError {
    pub session: String,
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for SessionLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not load {}: {}", self.path.display(), self.message)
    }
}

/// A session together with the players read from its report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedSession {
    pub session: Session,
    pub players: Vec<PlayerRecord>,
}

// ── WorkingTable ──────────────────────────────────────────────────────────────

/// The player records currently in scope for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkingTable {
    pub rows: Vec<PlayerRecord>,
    /// Session identifiers in scope, in listing order.
    pub sessions: Vec<String>,
    /// `true` when rows were grouped by player across several sessions.
    pub aggregated: bool,
}

impl WorkingTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
