use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "sprint";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        match ProjectDirs::from("", "", APP_NAME) {
            Some(pd) => pd.config_dir().join("config.json"),
            None => PathBuf::from("sprint_config.json"),
        }
    }

    /// The tui owns the terminal, so logs go to a file
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("sprint.log")
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|pd| pd.data_local_dir().join("sprint.log"))
                .unwrap_or_else(|| PathBuf::from("sprint.log"))
        }
    }
}
