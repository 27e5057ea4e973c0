//! # File Locations
//!
//! Where the settings file and the database live.
//!
//! ## Resolution (first match wins)
//! 1. Environment variables `PACEKEEPER_CONFIG_PATH` / `PACEKEEPER_DB_PATH`
//! 2. Platform directories:
//!    - **Linux**: `~/.config/pacekeeper/config.json`, `~/.local/share/pacekeeper/pacekeeper.db`
//!    - **macOS**: `~/Library/Application Support/com.pacekeeper.pacekeeper/…`
//!    - **Windows**: `%APPDATA%\pacekeeper\pacekeeper\…`

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Environment override for the settings file.
pub const CONFIG_PATH_ENV: &str = "PACEKEEPER_CONFIG_PATH";

/// Environment override for the database file.
pub const DB_PATH_ENV: &str = "PACEKEEPER_DB_PATH";

/// Settings file name inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "config.json";

/// Database file name inside the data directory.
pub const DATABASE_FILE_NAME: &str = "pacekeeper.db";

/// Resolved file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// JSON settings file.
    pub settings_path: PathBuf,

    /// SQLite database file.
    pub database_path: PathBuf,
}

impl AppPaths {
    /// Uses explicit paths.
    pub fn new(settings_path: impl Into<PathBuf>, database_path: impl Into<PathBuf>) -> Self {
        AppPaths {
            settings_path: settings_path.into(),
            database_path: database_path.into(),
        }
    }

    /// Puts both files in one directory (portable installs, tests).
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        AppPaths::new(dir.join(SETTINGS_FILE_NAME), dir.join(DATABASE_FILE_NAME))
    }

    /// Resolves paths from the process environment and platform directories.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves paths with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_dirs = || ProjectDirs::from("com", "pacekeeper", "pacekeeper");

        let settings_path = match lookup(CONFIG_PATH_ENV) {
            Some(path) => {
                debug!(%path, "Settings path overridden from environment");
                PathBuf::from(path)
            }
            None => project_dirs()
                .ok_or(AppError::NoDataDir)?
                .config_dir()
                .join(SETTINGS_FILE_NAME),
        };

        let database_path = match lookup(DB_PATH_ENV) {
            Some(path) => {
                debug!(%path, "Database path overridden from environment");
                PathBuf::from(path)
            }
            None => project_dirs()
                .ok_or(AppError::NoDataDir)?
                .data_dir()
                .join(DATABASE_FILE_NAME),
        };

        Ok(AppPaths {
            settings_path,
            database_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir() {
        let paths = AppPaths::in_dir("/data/pk");
        assert_eq!(paths.settings_path, PathBuf::from("/data/pk/config.json"));
        assert_eq!(paths.database_path, PathBuf::from("/data/pk/pacekeeper.db"));
    }

    #[test]
    fn test_overrides_win() {
        let paths = AppPaths::from_lookup(|key| match key {
            CONFIG_PATH_ENV => Some("/etc/pk.json".to_string()),
            DB_PATH_ENV => Some("/var/pk.db".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(paths, AppPaths::new("/etc/pk.json", "/var/pk.db"));
    }

    #[test]
    fn test_defaults_use_expected_file_names() {
        // Without a home directory there is nothing to resolve against.
        if let Ok(paths) = AppPaths::from_lookup(|_| None) {
            assert!(paths.settings_path.ends_with(SETTINGS_FILE_NAME));
            assert!(paths.database_path.ends_with(DATABASE_FILE_NAME));
        }
    }
}
