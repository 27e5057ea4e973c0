//! # PaceKeeper
//!
//! Runtime controller for the PaceKeeper study timer, plus a console driver
//! that stands in for the UI.
//!
//! ## Module Organization
//! ```text
//! pacekeeper/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Settings/database file locations
//! ├── error.rs        ◄─── AppError (startup) and ApiError (commands)
//! ├── state/
//! │   ├── controller.rs ◄─── ConfigController: status, cycle, settings facade
//! │   ├── settings.rs   ◄─── SettingsStore: config.json
//! │   └── global.rs     ◄─── Lazily built process-wide controller
//! ├── commands/       ◄─── start, stop, status, get, set, history, ...
//! └── console.rs      ◄─── Line-oriented driver (stdin → JSON on stdout)
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize logging (stderr; RUST_LOG overrides the default filter)  │
//! │  2. Resolve paths (PACEKEEPER_CONFIG_PATH / PACEKEEPER_DB_PATH or       │
//! │     platform directories)                                               │
//! │  3. Build the process controller                                        │
//! │     • load settings (defaults written on first run)                     │
//! │     • open database and apply migrations                                │
//! │  4. Run the console driver until `quit` or EOF                          │
//! │  5. Close the database pool                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod state;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::AppPaths;
pub use error::{ApiError, AppError, AppResult, ErrorCode};
pub use state::{ConfigController, RuntimeState, SettingsStore};

/// Runs the application until the console input ends.
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting PaceKeeper");

    let controller = state::global::controller().await?;

    let snapshot = controller.snapshot();
    info!(
        status = %snapshot.status.as_str(),
        cycle = snapshot.current_cycle,
        "Controller ready"
    );

    let input = BufReader::new(tokio::io::stdin());
    console::serve(&controller, input, tokio::io::stdout()).await?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pacekeeper=trace` - Trace for the app crate only
/// - Default: `info,pacekeeper=debug,sqlx=warn`
///
/// Logs go to stderr; stdout carries command responses.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pacekeeper=debug,sqlx=warn"));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
