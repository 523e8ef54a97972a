use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_TABLE_ROWS;
use crate::error::Result;
use crate::models::{Selection, SelectionMode, SessionOrder};

/// Directory under the home directory holding settings, logs and cache.
pub const APP_DIR_NAME: &str = ".raid-dashboard";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Raid performance dashboard over per-raid JSON reports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "raid-dashboard",
    about = "Raid performance dashboard over per-raid JSON reports",
    version
)]
pub struct Settings {
    /// Root directory holding one sub-directory per raid session
    #[arg(long, default_value = "reports", env = "RAID_REPORTS_DIR")]
    pub reports_dir: PathBuf,

    /// Session selection mode
    #[arg(long, default_value = "single", value_parser = ["all", "single", "multiple"])]
    pub mode: String,

    /// Session to include (repeatable; the first one is used in single mode)
    #[arg(long = "session")]
    pub sessions: Vec<String>,

    /// Session list ordering
    #[arg(long, default_value = "oldest", value_parser = ["oldest", "newest", "modified"])]
    pub order: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Output format
    #[arg(long, default_value = "tui", value_parser = ["tui", "json"])]
    pub output: String,

    /// Rows per ranking table (1-100)
    #[arg(
        long,
        default_value_t = DEFAULT_TABLE_ROWS as u32,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub top: u32,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.raid-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Load persisted params; `Default` when the file is absent or unreadable.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::debug!(
                path = %path.display(),
                error = %e,
                "ignoring unreadable last-used file"
            );
            Self::default()
        })
    }

    /// Atomically write params to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at `path` if it exists.
    pub fn clear_at(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments merged with the last-used file, then persist.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Parse `args`, fill every value not given on the command line from the
    /// file at `config_path`, and write the merged values back.
    pub fn load_with_last_used_impl(args: Vec<std::ffi::OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "could not clear last-used settings");
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // clap keys args by field name, not by long flag spelling.
        if !is_arg_explicitly_set(&matches, "reports_dir") {
            if let Some(v) = last.reports_dir {
                settings.reports_dir = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "mode") {
            if let Some(v) = last.mode {
                settings.mode = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "sessions") {
            if let Some(v) = last.sessions {
                settings.sessions = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "order") {
            if let Some(v) = last.order {
                settings.order = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }

        settings = Self::apply_debug(settings);

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "could not persist last-used settings");
        }

        settings
    }

    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Parsed selection mode.
    pub fn selection_mode(&self) -> Result<SelectionMode> {
        self.mode.parse()
    }

    /// Parsed session ordering.
    pub fn session_order(&self) -> Result<SessionOrder> {
        self.order.parse()
    }

    /// Initial selection described by `--mode` and `--session`.
    pub fn selection(&self) -> Result<Selection> {
        Ok(Selection {
            mode: self.selection_mode()?,
            sessions: self.sessions.clone(),
        })
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            reports_dir: Some(s.reports_dir.clone()),
            mode: Some(s.mode.clone()),
            sessions: (!s.sessions.is_empty()).then(|| s.sessions.clone()),
            order: Some(s.order.clone()),
            theme: Some(s.theme.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            reports_dir: Some(PathBuf::from("/srv/reports")),
            mode: Some("multiple".to_string()),
            sessions: Some(vec!["kara-01".to_string(), "gruul-02".to_string()]),
            order: Some("newest".to_string()),
            theme: Some("dark".to_string()),
        };

        params.save_to(&path).expect("save");
        let loaded = LastUsedParams::load_from(&path);

        assert_eq!(loaded, params);
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert_eq!(loaded, LastUsedParams::default());
    }

    #[test]
    fn test_last_used_params_default_when_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(LastUsedParams::load_from(&path), LastUsedParams::default());
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        LastUsedParams {
            theme: Some("light".to_string()),
            ..Default::default()
        }
        .save_to(&path)
        .expect("save");
        assert!(path.exists());

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists());
    }

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["raid-dashboard"]);

        assert_eq!(settings.reports_dir, PathBuf::from("reports"));
        assert_eq!(settings.mode, "single");
        assert!(settings.sessions.is_empty());
        assert_eq!(settings.order, "oldest");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.output, "tui");
        assert_eq!(settings.top, 20);
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_repeatable_session() {
        let settings = Settings::parse_from([
            "raid-dashboard",
            "--mode",
            "multiple",
            "--session",
            "kara-01",
            "--session",
            "kara-02",
        ]);
        let selection = settings.selection().unwrap();
        assert_eq!(selection.mode, SelectionMode::Multiple);
        assert_eq!(selection.sessions, vec!["kara-01", "kara-02"]);
    }

    #[test]
    fn test_settings_rejects_unknown_mode() {
        let result = Settings::try_parse_from(["raid-dashboard", "--mode", "some"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_top_range() {
        assert!(Settings::try_parse_from(["raid-dashboard", "--top", "0"]).is_err());
        let settings = Settings::parse_from(["raid-dashboard", "--top", "5"]);
        assert_eq!(settings.top, 5);
    }

    #[test]
    fn test_session_order_parsed() {
        let settings = Settings::parse_from(["raid-dashboard", "--order", "modified"]);
        assert_eq!(settings.session_order().unwrap(), SessionOrder::Modified);
    }

    #[test]
    fn test_load_with_last_used_merges_persisted_values() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            reports_dir: Some(PathBuf::from("/srv/reports")),
            mode: Some("all".to_string()),
            theme: Some("dark".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings =
            Settings::load_with_last_used_impl(vec!["raid-dashboard".into()], &config_path);
        assert_eq!(settings.reports_dir, PathBuf::from("/srv/reports"));
        assert_eq!(settings.mode, "all");
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            theme: Some("dark".to_string()),
            mode: Some("all".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec![
                "raid-dashboard".into(),
                "--theme".into(),
                "light".into(),
                "--mode".into(),
                "single".into(),
            ],
            &config_path,
        );
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.mode, "single");
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            theme: Some("classic".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec!["raid-dashboard".into(), "--clear".into()],
            &config_path,
        );

        assert!(!config_path.exists());
        assert_eq!(settings.theme, "auto");
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = Settings::load_with_last_used_impl(
            vec!["raid-dashboard".into(), "--debug".into()],
            &tmp_config_path(&tmp),
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            vec![
                "raid-dashboard".into(),
                "--order".into(),
                "newest".into(),
                "--session".into(),
                "kara-03".into(),
            ],
            &config_path,
        );

        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.order, Some("newest".to_string()));
        assert_eq!(loaded.sessions, Some(vec!["kara-03".to_string()]));
        assert_eq!(loaded.reports_dir, Some(PathBuf::from("reports")));
    }
}
