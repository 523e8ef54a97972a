//! Combining player records across raid sessions.
//!
//! A single session is shown as-is. Several sessions are folded into one row
//! per player: counters are summed, other fields keep their first value and
//! the contributing session identifiers are collected.

use std::collections::{BTreeMap, BTreeSet};

use raid_core::error::{DashboardError, Result};
use raid_core::models::{LoadedSession, PlayerRecord, Selection, SelectionMode, WorkingTable};
use tracing::debug;

/// Concatenate the players of every session accepted by `include`, in
/// session order, dropping each report's `"Total"` row.
pub fn concat_players<F>(loaded: &[LoadedSession], include: F) -> Vec<PlayerRecord>
where
    F: Fn(&LoadedSession) -> bool,
{
    loaded
        .iter()
        .filter(|s| include(*s))
        .flat_map(|s| s.players.iter())
        .filter(|p| !p.is_total())
        .cloned()
        .collect()
}

/// Every player of every session; the input of the overall statistics.
pub fn all_players(loaded: &[LoadedSession]) -> Vec<PlayerRecord> {
    concat_players(loaded, |_| true)
}

/// Group `records` by player name and fold each group into one row.
///
/// Rows come back ordered by player name. Folding an already aggregated
/// table together with more records gives the same result as aggregating
/// everything at once.
pub fn aggregate_by_player(records: &[PlayerRecord]) -> Vec<PlayerRecord> {
    let mut groups: BTreeMap<&str, PlayerRecord> = BTreeMap::new();

    for record in records.iter().filter(|r| !r.is_total()) {
        groups
            .entry(record.name.as_str())
            .or_insert_with(|| PlayerRecord::new(record.name.clone()))
            .absorb(record);
    }

    groups.into_values().collect()
}

/// Session identifiers the selection puts in scope, in listing order.
pub fn sessions_in_scope(selection: &Selection, loaded: &[LoadedSession]) -> Vec<String> {
    let ids = loaded.iter().map(|s| s.session.id.as_str());
    match selection.mode {
        SelectionMode::All => ids.map(str::to_string).collect(),
        SelectionMode::Single => {
            let chosen = selection
                .sessions
                .first()
                .map(String::as_str)
                .filter(|id| loaded.iter().any(|s| s.session.id == *id));
            // Fall back to the first listed session, like a drop-down that
            // always has an entry selected.
            chosen
                .or_else(|| loaded.first().map(|s| s.session.id.as_str()))
                .map(|id| vec![id.to_string()])
                .unwrap_or_default()
        }
        SelectionMode::Multiple => {
            let chosen: BTreeSet<&str> = selection.sessions.iter().map(String::as_str).collect();
            ids.filter(|id| chosen.contains(id))
                .map(str::to_string)
                .collect()
        }
    }
}

/// Build the working table for `selection`.
///
/// One session in scope keeps its rows unchanged; more than one groups rows
/// by player. Returns [`DashboardError::EmptySelection`] when no player
/// records remain.
pub fn resolve_working_table(
    selection: &Selection,
    loaded: &[LoadedSession],
) -> Result<WorkingTable> {
    let sessions = sessions_in_scope(selection, loaded);
    let in_scope: BTreeSet<&str> = sessions.iter().map(String::as_str).collect();

    let records = concat_players(loaded, |s| in_scope.contains(s.session.id.as_str()));
    if records.is_empty() {
        debug!(
            mode = selection.mode.as_str(),
            sessions = sessions.len(),
            "selection resolved to no player records"
        );
        return Err(DashboardError::EmptySelection);
    }

    let aggregated = sessions.len() > 1;
    let rows = if aggregated {
        aggregate_by_player(&records)
    } else {
        records
    };

    debug!(
        mode = selection.mode.as_str(),
        sessions = sessions.len(),
        rows = rows.len(),
        aggregated,
        "working table resolved"
    );

    Ok(WorkingTable {
        rows,
        sessions,
        aggregated,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
