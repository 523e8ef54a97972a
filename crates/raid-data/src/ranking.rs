//! Top-N slices of the working table for ranking tables and bar charts.

use std::cmp::Ordering;

use raid_core::catalog::DEFAULT_VALUE_LABEL;
use raid_core::models::PlayerRecord;
use serde::Serialize;

/// One ranked player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub name: String,
    pub value: f64,
    /// Contributing session identifiers, when the view carries them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

/// A ranking table ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTable {
    pub title: String,
    pub column: String,
    /// Header of the value column.
    pub value_label: String,
    pub rows: Vec<RankedRow>,
}

/// How chart labels are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// Player names as they are.
    Plain,
    /// Names prefixed with `top - rank` spaces, for chart widgets that sort
    /// bars by label.
    RankPadded,
}

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

/// Single-series labeled-value chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub title: String,
    pub column: String,
    pub bars: Vec<ChartBar>,
}

/// Stable descending order on `f64`; incomparable values keep their place.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Top `n` rows by `column`, keeping only strictly positive values.
///
/// The sort is stable, so players with equal values keep their table order.
pub fn top_n(table: &[PlayerRecord], column: &str, n: usize) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = table
        .iter()
        .filter(|r| !r.is_total())
        .map(|r| RankedRow {
            name: r.name.clone(),
            value: r.value(column),
            session: None,
        })
        .filter(|r| r.value > 0.0)
        .collect();

    rows.sort_by(|a, b| descending(a.value, b.value));
    rows.truncate(n);
    rows
}

/// [`top_n`] packaged as a titled table. `display_name` renames the value
/// column; `None` uses the default `"used"`.
pub fn top_table(
    table: &[PlayerRecord],
    title: &str,
    column: &str,
    n: usize,
    display_name: Option<&str>,
) -> TopTable {
    TopTable {
        title: title.to_string(),
        column: column.to_string(),
        value_label: display_name.unwrap_or(DEFAULT_VALUE_LABEL).to_string(),
        rows: top_n(table, column, n),
    }
}

/// Chart variant of [`top_n`].
pub fn chart_slice(
    table: &[PlayerRecord],
    title: &str,
    column: &str,
    n: usize,
    style: LabelStyle,
) -> ChartPayload {
    let bars = top_n(table, column, n)
        .into_iter()
        .enumerate()
        .map(|(rank, row)| ChartBar {
            label: match style {
                LabelStyle::Plain => row.name,
                LabelStyle::RankPadded => format!("{}{}", " ".repeat(n - rank), row.name),
            },
            value: row.value,
        })
        .collect();

    ChartPayload {
        title: title.to_string(),
        column: column.to_string(),
        bars,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
