mod bootstrap;

use anyhow::Result;
use raid_core::catalog::Catalog;
use raid_core::error::DashboardError;
use raid_core::models::Selection;
use raid_core::settings::Settings;
use raid_data::ranking::LabelStyle;
use raid_runtime::dashboard::build_dashboard;
use raid_runtime::data_manager::DataManager;
use raid_ui::app::{restore_terminal, App};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    let reports_dir = bootstrap::resolve_reports_dir(&settings.reports_dir);
    tracing::info!("Raid Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Reports: {}, Mode: {}, Order: {}, Theme: {}",
        reports_dir.display(),
        settings.mode,
        settings.order,
        settings.theme
    );

    let selection = settings.selection()?;
    let catalog = Catalog::raid().with_table_rows(settings.top as usize);
    let mut manager = DataManager::new(reports_dir, settings.session_order()?);

    match settings.output.as_str() {
        "json" => {
            println!("{}", export_json(&mut manager, &selection, &catalog)?);
        }
        _ => {
            let reports = manager.get_data(false).clone();
            let app = App::new(
                &settings.theme,
                catalog,
                selection,
                reports,
                settings.reports_dir.display().to_string(),
            );

            // The loop exits on 'q' / Ctrl+C inside the TUI. The OS-level
            // signal covers Ctrl+C delivered while a key poll is pending.
            tokio::select! {
                result = app.run(&mut manager) => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                    restore_terminal()?;
                }
            }
        }
    }

    tracing::info!("Raid Dashboard stopped");
    Ok(())
}

/// Render the dashboard for `selection` as pretty-printed JSON.
///
/// A missing reports root and an empty selection are errors here, so the
/// process exits non-zero instead of printing an empty document.
fn export_json(
    manager: &mut DataManager,
    selection: &Selection,
    catalog: &Catalog,
) -> raid_core::error::Result<String> {
    if !manager.reports_dir().is_dir() {
        return Err(DashboardError::ReportsDirNotFound(
            manager.reports_dir().to_path_buf(),
        ));
    }
    let reports = manager.get_data(false);
    let snapshot = build_dashboard(selection, reports, catalog, LabelStyle::RankPadded)?;
    serde_json::to_string_pretty(&snapshot).map_err(|e| DashboardError::Other(e.into()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
