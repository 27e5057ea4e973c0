//! # Status Commands
//!
//! Start, stop and inspect the timer.
//!
//! ## Session Recording
//! ```text
//! start ──► (running, Study, started_at = now)
//!   │
//!   ├── cycle ──► current_cycle += 1
//!   │
//! stop  ──► was running? ── yes ──► sessions().record(Study, started_at, now, cycles)
//!   │                       │           │ error ──► still running, stop can be retried
//!   │                       no  ──► nothing recorded
//!   ▼
//! (stopped, Wait, cycle 0)
//! ```

use chrono::Utc;
use pacekeeper_core::{is_break, AppStatus, SessionRecord};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::state::{ConfigController, RuntimeState};

/// Status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub status: AppStatus,
    pub label: &'static str,
    pub value: i64,
    pub is_break: bool,
    pub is_running: bool,
    pub cycle: u64,
}

impl From<RuntimeState> for StatusDto {
    fn from(state: RuntimeState) -> Self {
        StatusDto {
            status: state.status,
            label: state.status.label(),
            value: state.status.value_int(),
            is_break: is_break(state.status),
            is_running: state.is_running,
            cycle: state.current_cycle,
        }
    }
}

/// Response to `stop`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    pub status: StatusDto,
    /// The session written for the run that just ended, if one was running.
    pub recorded: Option<SessionRecord>,
}

/// Current status.
pub fn get_status(controller: &ConfigController) -> StatusDto {
    debug!("get_status command");
    controller.snapshot().into()
}

/// Starts (or resumes) the timer in `Study`.
pub fn start(controller: &ConfigController) -> StatusDto {
    debug!("start command");
    controller.start_app();
    controller.snapshot().into()
}

/// Stops the timer and records the finished run.
///
/// The run is written before the runtime state is reset. When the write
/// fails the timer keeps running, so `stop` can be retried.
pub async fn stop(controller: &ConfigController) -> Result<StopDto, ApiError> {
    debug!("stop command");
    let current = controller.snapshot();

    let recorded = match (current.is_running, current.started_at) {
        (true, Some(started_at)) => {
            let record = controller
                .db()
                .sessions()
                .record(
                    AppStatus::Study,
                    started_at,
                    Utc::now(),
                    current.current_cycle,
                )
                .await
                .map_err(|e| {
                    error!(
                        error = %e,
                        %started_at,
                        cycles = current.current_cycle,
                        "Failed to record session; timer left running"
                    );
                    e
                })?;
            info!(
                id = %record.id,
                duration_secs = record.duration_secs,
                "Session recorded"
            );
            Some(record)
        }
        _ => None,
    };

    controller.stop_app();

    Ok(StopDto {
        status: controller.snapshot().into(),
        recorded,
    })
}

/// Forces a status.
pub fn set_status(controller: &ConfigController, status: AppStatus) -> StatusDto {
    debug!(status = %status.as_str(), "set_status command");
    controller.set_status(status);
    controller.snapshot().into()
}

/// Counts one finished work cycle.
pub fn complete_cycle(controller: &ConfigController) -> StatusDto {
    debug!("complete_cycle command");
    controller.increment_cycle();
    controller.snapshot().into()
}
