//! # Settings Store
//!
//! The settings collaborator: owns the JSON settings file.
//!
//! ## File Contract
//! ```text
//! load_settings()
//!   ├── file missing   → defaults, written to disk
//!   ├── JSON object    → defaults ⊕ file (file wins)
//!   └── anything else  → AppError::SettingsParse
//!
//! update_settings(map)
//!   └── merge in memory, then write the whole map (pretty JSON)
//! ```
//!
//! An in-memory store behaves the same but never touches the disk.

use std::path::{Path, PathBuf};

use pacekeeper_core::Settings;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Settings collaborator backed by an optional JSON file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    settings: Settings,
}

impl SettingsStore {
    /// A store for `path`. Nothing is read until [`load_settings`](Self::load_settings).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        SettingsStore {
            path: Some(path.into()),
            settings: Settings::defaults(),
        }
    }

    /// A store that keeps everything in memory.
    pub fn in_memory() -> Self {
        SettingsStore {
            path: None,
            settings: Settings::defaults(),
        }
    }

    /// An in-memory store seeded with `settings` instead of the defaults.
    pub fn with_settings(settings: Settings) -> Self {
        SettingsStore {
            path: None,
            settings,
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Loads the backing file, creating it with defaults when missing.
    pub fn load_settings(&mut self) -> AppResult<()> {
        let Some(path) = self.path.clone() else {
            debug!("In-memory settings store, nothing to load");
            return Ok(());
        };

        if !path.exists() {
            info!(path = %path.display(), "Settings file not found, writing defaults");
            self.settings = Settings::defaults();
            return self.save();
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| AppError::SettingsIo {
            path: path.clone(),
            source,
        })?;

        let parsed: Value =
            serde_json::from_str(&contents).map_err(|e| AppError::SettingsParse {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let Value::Object(map) = parsed else {
            return Err(AppError::SettingsParse {
                path,
                reason: "expected a JSON object at the top level".to_string(),
            });
        };

        let mut settings = Settings::defaults();
        settings.merge(Settings::from(map));
        self.settings = settings;

        info!(
            path = %path.display(),
            entries = self.settings.len(),
            "Settings loaded"
        );
        Ok(())
    }

    /// Merges `new_settings` over the current map and persists the result.
    pub fn update_settings(&mut self, new_settings: Settings) -> AppResult<()> {
        debug!(entries = new_settings.len(), "Updating settings");
        self.settings.merge(new_settings);
        self.save()
    }

    /// Writes the whole map to the backing file.
    fn save(&self) -> AppResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let io_err = |source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let contents =
            serde_json::to_string_pretty(&self.settings).map_err(|e| AppError::SettingsParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        std::fs::write(path, contents).map_err(io_err)?;

        debug!(path = %path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    /// Settings path inside a fresh directory; the directory goes away with the guard.
    fn temp_path() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pacekeeper").join("config.json");
        (dir, path)
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let (_dir, path) = temp_path();
        let mut store = SettingsStore::open(&path);

        store.load_settings().unwrap();

        assert!(path.exists());
        assert_eq!(store.settings(), &Settings::defaults());

        let on_disk: Settings =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, Settings::defaults());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let (_dir, path) = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"study_time": 50, "theme": "dark"}"#).unwrap();

        let mut store = SettingsStore::open(&path);
        store.load_settings().unwrap();

        assert_eq!(store.settings().get_as::<u64>("study_time"), Some(50));
        assert_eq!(store.settings().get_or("theme", Value::Null), json!("dark"));
        assert_eq!(store.settings().get_as::<u64>("short_break"), Some(5));
    }

    #[test]
    fn test_update_persists_and_reloads() {
        let (_dir, path) = temp_path();
        let mut store = SettingsStore::open(&path);
        store.load_settings().unwrap();

        let mut update = Settings::new();
        update.insert("volume", json!(5));
        store.update_settings(update).unwrap();

        let mut reopened = SettingsStore::open(&path);
        reopened.load_settings().unwrap();
        assert_eq!(reopened.settings().get_or("volume", json!(0)), json!(5));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let (_dir, path) = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let err = SettingsStore::open(&path).load_settings().unwrap_err();
        assert!(matches!(err, AppError::SettingsParse { .. }));
    }

    #[test]
    fn test_non_object_is_parse_error() {
        let (_dir, path) = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = SettingsStore::open(&path).load_settings().unwrap_err();
        assert!(matches!(err, AppError::SettingsParse { .. }));
    }

    #[test]
    fn test_in_memory_store_never_writes() {
        let mut store = SettingsStore::in_memory();
        store.load_settings().unwrap();

        let mut update = Settings::new();
        update.insert("volume", json!(80));
        store.update_settings(update).unwrap();

        assert!(store.path().is_none());
        assert_eq!(store.settings().get_or("volume", json!(0)), json!(80));
    }
}
