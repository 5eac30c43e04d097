use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized resolution of the three persisted records.
pub struct AppDirs;

impl AppDirs {
    fn config_dir() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "typro") {
            proj_dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        }
    }

    pub fn settings_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    pub fn stats_path() -> PathBuf {
        Self::config_dir().join("stats.json")
    }

    pub fn theme_path() -> PathBuf {
        Self::config_dir().join("theme")
    }
}
