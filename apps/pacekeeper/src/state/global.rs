//! # Process-Wide Controller
//!
//! Lazily built, never torn down. The first caller pays for loading settings
//! and initializing the database; concurrent first callers wait for that one
//! initialization and everyone gets the same `Arc`.
//!
//! Code that can receive the controller by reference should; this accessor
//! exists for callers at the edges (entry point, signal handlers) that can't.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::config::AppPaths;
use crate::error::AppResult;
use crate::state::controller::ConfigController;

static CONTROLLER: OnceCell<Arc<ConfigController>> = OnceCell::const_new();

/// The process controller, built from [`AppPaths::from_env`] on first access.
pub async fn controller() -> AppResult<Arc<ConfigController>> {
    get_or_init_with(|| async {
        let paths = AppPaths::from_env()?;
        info!(
            settings = %paths.settings_path.display(),
            database = %paths.database_path.display(),
            "Building process controller"
        );
        ConfigController::from_paths(&paths).await
    })
    .await
}

/// The process controller, built by `init` if nobody has built it yet.
///
/// A failed `init` leaves the cell empty so a later call can retry.
pub async fn get_or_init_with<F, Fut>(init: F) -> AppResult<Arc<ConfigController>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<ConfigController>>,
{
    CONTROLLER
        .get_or_try_init(|| async move { init().await.map(Arc::new) })
        .await
        .cloned()
}

/// The process controller if it has been built.
pub fn try_get() -> Option<Arc<ConfigController>> {
    CONTROLLER.get().cloned()
}
