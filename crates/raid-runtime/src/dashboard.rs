//! Dashboard evaluation.
//!
//! [`build_dashboard`] is a pure function of the selection, the loaded
//! reports and the catalog. It is rerun from scratch whenever any of them
//! changes.

use raid_core::catalog::{Catalog, DPS_COLUMN, OVERALL_ROWS};
use raid_core::error::Result;
use raid_core::models::{Selection, SessionLoadError};
use raid_data::aggregator::{all_players, resolve_working_table};
use raid_data::loader::ReportSet;
use raid_data::overview::{average_by_player, global_top, PlayerAverage};
use raid_data::ranking::{chart_slice, top_table, ChartPayload, LabelStyle, RankedRow, TopTable};
use serde::Serialize;

/// One catalog section with its evaluated tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub title: String,
    pub tables: Vec<TopTable>,
}

/// Views over every loaded session, regardless of the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub top_dps: Vec<RankedRow>,
    pub average_dps: Vec<PlayerAverage>,
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub selection: Selection,
    pub available_sessions: Vec<String>,
    pub sessions_in_scope: Vec<String>,
    pub row_count: usize,
    pub aggregated: bool,
    pub charts: Vec<ChartPayload>,
    pub sections: Vec<SectionView>,
    pub overall: OverallStats,
    pub warnings: Vec<SessionLoadError>,
}

/// Evaluate the dashboard for `selection`.
///
/// Fails with [`raid_core::error::DashboardError::EmptySelection`] when the
/// selection leaves no player records; no view is computed in that case.
pub fn build_dashboard(
    selection: &Selection,
    reports: &ReportSet,
    catalog: &Catalog,
    labels: LabelStyle,
) -> Result<DashboardSnapshot> {
    let table = resolve_working_table(selection, &reports.sessions)?;

    let charts = catalog
        .charts
        .iter()
        .map(|c| chart_slice(&table.rows, c.title, c.column, c.top, labels))
        .collect();

    let sections = catalog
        .sections
        .iter()
        .map(|s| SectionView {
            title: s.title.to_string(),
            tables: s
                .tables
                .iter()
                .map(|t| top_table(&table.rows, t.title, t.column, catalog.table_rows, None))
                .collect(),
        })
        .collect();

    let raw = all_players(&reports.sessions);
    let mut average_dps = average_by_player(&raw, DPS_COLUMN);
    average_dps.truncate(OVERALL_ROWS);
    let overall = OverallStats {
        top_dps: global_top(&raw, DPS_COLUMN, OVERALL_ROWS),
        average_dps,
    };

    tracing::debug!(
        mode = selection.mode.as_str(),
        rows = table.len(),
        "dashboard snapshot built"
    );

    Ok(DashboardSnapshot {
        selection: selection.clone(),
        available_sessions: reports.session_ids(),
        row_count: table.len(),
        aggregated: table.aggregated,
        sessions_in_scope: table.sessions,
        charts,
        sections,
        overall,
        warnings: reports.warnings.clone(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
