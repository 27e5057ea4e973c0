//! # Domain Types
//!
//! Records produced by the data-recording collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::AppStatus;

// =============================================================================
// Session Record
// =============================================================================

/// One recorded run, from `start` to `stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Phase that was recorded (normally `Study`).
    pub status: AppStatus,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run ended.
    pub ended_at: DateTime<Utc>,

    /// Whole seconds between start and end, never negative.
    pub duration_secs: i64,

    /// Cycle counter at the moment the run ended.
    pub cycles: i64,
}

impl SessionRecord {
    /// Seconds between two instants, clamped at zero for clocks that went backwards.
    pub fn duration_between(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> i64 {
        (ended_at - started_at).num_seconds().max(0)
    }

    /// Duration in whole minutes (for display).
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.duration_secs / 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_duration_between() {
        let start = Utc::now();
        let end = start + Duration::minutes(25);
        assert_eq!(SessionRecord::duration_between(start, end), 1500);
    }

    #[test]
    fn test_duration_clamped_at_zero() {
        let start = Utc::now();
        let end = start - Duration::seconds(30);
        assert_eq!(SessionRecord::duration_between(start, end), 0);
    }
}
