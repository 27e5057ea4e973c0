//! # Config Controller
//!
//! Runtime status, cycle counter and settings facade for the study timer.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            start_app()                                                  │
//! │   WAIT ──────────────────► STUDY ◄──────────┐                           │
//! │    ▲                         │              │ set_status(any)           │
//! │    │ stop_app()              │ set_status   │                           │
//! │    │ (cycle := 0)            ▼              │                           │
//! │    └──────────────── SHORT_BREAK / LONG_BREAK                          │
//! │                                                                         │
//! │  set_status() never validates: any state can follow any other.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Runtime fields sit behind one `Mutex`, the settings store behind another,
//! so every mutator is atomic and the controller can be shared as
//! `Arc<ConfigController>`. No lock is held across an `.await`.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use pacekeeper_core::{AppStatus, Settings};
use pacekeeper_db::{Database, DbConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::AppPaths;
use crate::error::AppResult;
use crate::state::settings::SettingsStore;

/// The in-memory fields the controller owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeState {
    /// Current phase.
    pub status: AppStatus,

    /// Whether the timer is running.
    pub is_running: bool,

    /// Work cycles completed since the last stop.
    pub current_cycle: u64,

    /// When the current run started; `None` while stopped.
    pub started_at: Option<DateTime<Utc>>,
}

/// Process-wide runtime state and settings facade.
///
/// Construct once at startup and share by reference, or go through
/// [`crate::state::global`] for the lazily built process instance.
#[derive(Debug)]
pub struct ConfigController {
    runtime: Mutex<RuntimeState>,
    settings: Mutex<SettingsStore>,
    db: Database,
}

impl ConfigController {
    /// Builds the controller and initializes both collaborators.
    ///
    /// ## Steps
    /// 1. `settings.load_settings()`
    /// 2. Open the database and call `init_db()`
    ///
    /// Either failure is returned to the caller unchanged.
    pub async fn initialize(mut settings: SettingsStore, db_config: DbConfig) -> AppResult<Self> {
        settings.load_settings()?;

        let db = Database::new(db_config.run_migrations(false)).await?;
        db.init_db().await?;

        info!(
            settings_path = ?settings.path(),
            "Controller initialized"
        );

        Ok(Self::from_parts(settings, db))
    }

    /// Builds the controller from resolved file locations.
    pub async fn from_paths(paths: &AppPaths) -> AppResult<Self> {
        Self::initialize(
            SettingsStore::open(&paths.settings_path),
            DbConfig::new(&paths.database_path),
        )
        .await
    }

    /// Wraps already-initialized collaborators. Nothing is loaded.
    pub fn from_parts(settings: SettingsStore, db: Database) -> Self {
        ConfigController {
            runtime: Mutex::new(RuntimeState::default()),
            settings: Mutex::new(settings),
            db,
        }
    }

    fn runtime(&self) -> MutexGuard<'_, RuntimeState> {
        self.runtime.lock().expect("Runtime state mutex poisoned")
    }

    fn store(&self) -> MutexGuard<'_, SettingsStore> {
        self.settings.lock().expect("Settings mutex poisoned")
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Stored value for `key`, or `default` when absent.
    pub fn get_setting(&self, key: &str, default: impl Into<Value>) -> Value {
        self.store().settings().get_or(key, default.into())
    }

    /// Typed read; `None` when missing or of another type.
    pub fn get_setting_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.store().settings().get_as(key)
    }

    /// Snapshot of all settings.
    pub fn settings(&self) -> Settings {
        self.store().settings().clone()
    }

    /// Merges entries into the settings store, which persists them.
    pub fn update_settings(&self, new_settings: Settings) -> AppResult<()> {
        self.store().update_settings(new_settings)
    }

    // =========================================================================
    // Status / work flow
    // =========================================================================

    /// Current status.
    pub fn get_status(&self) -> AppStatus {
        self.runtime().status
    }

    /// Overwrites the status. Any transition is allowed.
    pub fn set_status(&self, status: AppStatus) {
        let mut runtime = self.runtime();
        debug!(from = %runtime.status.as_str(), to = %status.as_str(), "Status change");
        runtime.status = status;
    }

    /// Marks the timer running and enters `Study`. The cycle count is kept.
    pub fn start_app(&self) {
        let mut runtime = self.runtime();
        if !runtime.is_running {
            runtime.started_at = Some(Utc::now());
        }
        runtime.is_running = true;
        runtime.status = AppStatus::Study;
        info!(cycle = runtime.current_cycle, "Timer started");
    }

    /// Stops the timer, returns to `Wait` and resets the cycle count.
    ///
    /// Returns the state as it was just before stopping.
    pub fn stop_app(&self) -> RuntimeState {
        let mut runtime = self.runtime();
        let previous = *runtime;
        *runtime = RuntimeState::default();
        info!(
            was_running = previous.is_running,
            cycles = previous.current_cycle,
            "Timer stopped"
        );
        previous
    }

    /// Adds one completed work cycle.
    pub fn increment_cycle(&self) {
        let mut runtime = self.runtime();
        runtime.current_cycle = runtime.current_cycle.saturating_add(1);
        debug!(cycle = runtime.current_cycle, "Cycle incremented");
    }

    /// Work cycles since the last stop.
    pub fn get_cycle(&self) -> u64 {
        self.runtime().current_cycle
    }

    /// Whether the timer is running.
    pub fn is_running(&self) -> bool {
        self.runtime().is_running
    }

    /// All runtime fields, read under one lock.
    pub fn snapshot(&self) -> RuntimeState {
        *self.runtime()
    }

    /// The data-recording collaborator.
    pub fn db(&self) -> &Database {
        &self.db
    }
}
