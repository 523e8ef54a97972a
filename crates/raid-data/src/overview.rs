//! Statistics over every loaded session, independent of the selection.

use std::collections::BTreeMap;

use raid_core::models::PlayerRecord;
use serde::Serialize;

use crate::ranking::{descending, RankedRow};

/// Mean of one column for one player across all their rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAverage {
    pub name: String,
    pub mean: f64,
    /// Number of rows the mean was taken over.
    pub samples: usize,
}

/// The `n` highest individual rows by `column`, with the session each came
/// from. Unlike [`crate::ranking::top_n`] no positivity filter applies, but
/// rows without the column rank after every row that has it.
pub fn global_top(raw: &[PlayerRecord], column: &str, n: usize) -> Vec<RankedRow> {
    let mut rows: Vec<(bool, RankedRow)> = raw
        .iter()
        .filter(|r| !r.is_total())
        .map(|r| {
            let value = r.stats.get(column).copied();
            let row = RankedRow {
                name: r.name.clone(),
                value: value.unwrap_or(0.0),
                session: Some(r.session_label()),
            };
            (value.is_some(), row)
        })
        .collect();

    rows.sort_by(|(a_has, a), (b_has, b)| {
        b_has.cmp(a_has).then_with(|| descending(a.value, b.value))
    });
    rows.into_iter().take(n).map(|(_, row)| row).collect()
}

/// Per-player mean of `column`, highest first. Rows missing the column are
/// not samples; players with no sample at all are left out. Equal means are
/// ordered by player name.
pub fn average_by_player(raw: &[PlayerRecord], column: &str) -> Vec<PlayerAverage> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in raw.iter().filter(|r| !r.is_total()) {
        let Some(value) = record.stats.get(column) else {
            continue;
        };
        let entry = sums.entry(record.name.as_str()).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    let mut averages: Vec<PlayerAverage> = sums
        .into_iter()
        .map(|(name, (sum, samples))| PlayerAverage {
            name: name.to_string(),
            mean: sum / samples as f64,
            samples,
        })
        .collect();

    averages.sort_by(|a, b| descending(a.mean, b.mean));
    averages
}

// ── Tests ─────────────────────────────────────────────────────────────────────
