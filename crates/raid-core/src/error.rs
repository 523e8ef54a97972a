use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the raid dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A report file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report file is not a valid JSON document.
    #[error("Failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but does not have the shape of a raid report.
    #[error("Invalid report {path}: {reason}")]
    InvalidReport { path: PathBuf, reason: String },

    /// The current selection resolved to zero player records.
    #[error("No player data for the selected sessions")]
    EmptySelection,

    /// The configured reports root does not exist.
    #[error("Reports directory not found: {0}")]
    ReportsDirNotFound(PathBuf),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::FileRead {
            path: PathBuf::from("reports/kara-01/report.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("reports/kara-01/report.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_json_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err = DashboardError::JsonParse {
            path: PathBuf::from("r/report.json"),
            source: json_err,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse JSON in r/report.json"));
    }

    #[test]
    fn test_error_display_invalid_report() {
        let err = DashboardError::InvalidReport {
            path: PathBuf::from("r/report.json"),
            reason: "\"players\" is not an array".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid report r/report.json: \"players\" is not an array"
        );
    }

    #[test]
    fn test_error_display_empty_selection() {
        let err = DashboardError::EmptySelection;
        assert_eq!(err.to_string(), "No player data for the selected sessions");
    }

    #[test]
    fn test_error_display_reports_dir_not_found() {
        let err = DashboardError::ReportsDirNotFound(PathBuf::from("/missing/reports"));
        assert_eq!(err.to_string(), "Reports directory not found: /missing/reports");
    }

    #[test]
    fn test_error_display_terminal() {
        let err = DashboardError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("bad mode".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad mode");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
