//! # History Commands
//!
//! Recorded sessions from the database.

use pacekeeper_core::SessionRecord;
use tracing::debug;

use crate::error::ApiError;
use crate::state::ConfigController;

/// Sessions returned when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Upper bound on a single history request.
pub const MAX_HISTORY_LIMIT: u32 = 500;

/// Most recent sessions, newest first. A limit of 0 returns nothing.
pub async fn recent_sessions(
    controller: &ConfigController,
    limit: u32,
) -> Result<Vec<SessionRecord>, ApiError> {
    let limit = limit.min(MAX_HISTORY_LIMIT);
    debug!(limit, "recent_sessions command");
    if limit == 0 {
        return Ok(Vec::new());
    }

    Ok(controller.db().sessions().recent(limit).await?)
}
