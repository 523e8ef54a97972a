use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use raid_core::settings::APP_DIR_NAME;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name of the default log inside `~/.raid-dashboard/logs/`.
const LOG_FILE_NAME: &str = "raid-dashboard.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Application directory under the user's home (`~/.raid-dashboard/`).
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Ensure `~/.raid-dashboard/` and `~/.raid-dashboard/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    let dir = app_dir();
    std::fs::create_dir_all(&dir)?;
    std::fs::create_dir_all(dir.join("logs"))?;
    Ok(())
}

/// Log file used when `--log-file` is not given.
pub fn default_log_file() -> PathBuf {
    app_dir().join("logs").join(LOG_FILE_NAME)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` value to an [`EnvFilter`] directive.
///
/// Unrecognised values are passed through so `RUST_LOG`-style directives
/// such as `raid_data=debug` also work.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output is appended to `log_file`, or to [`default_log_file`] when `None`,
/// so log lines never land on the terminal UI. Falls back to `"info"` if the
/// level string is not a valid filter.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let path = log_file.map(Path::to_path_buf).unwrap_or_else(default_log_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}

// ── Reports directory ──────────────────────────────────────────────────────────

/// Resolve `--reports-dir` against the working directory for display and
/// logging. A missing directory is not an error here; the scanner reports it.
pub fn resolve_reports_dir(reports_dir: &Path) -> PathBuf {
    if reports_dir.is_absolute() {
        reports_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(reports_dir))
            .unwrap_or_else(|_| reports_dir.to_path_buf())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
