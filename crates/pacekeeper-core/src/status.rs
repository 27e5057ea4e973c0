//! # Runtime Status
//!
//! The phase the study timer is currently in.
//!
//! ## Status Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Variant      │ Ordinal │ Wire name     │ Label         │ Break?       │
//! │  ─────────────┼─────────┼───────────────┼───────────────┼──────────    │
//! │  Wait         │    0    │ wait          │ Waiting       │   no         │
//! │  Study        │    1    │ study         │ Studying      │   no         │
//! │  ShortBreak   │    2    │ short_break   │ Short break   │   yes        │
//! │  LongBreak    │    3    │ long_break    │ Long break    │   yes        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ordinal is stable: it is what the database stores.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::{STATUS_LONG_BREAK, STATUS_SHORT_BREAK, STATUS_STUDY, STATUS_WAIT};

/// The current phase of the timer workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppStatus {
    /// Not running; waiting for the user to start.
    #[default]
    Wait,
    /// A study phase is in progress.
    Study,
    /// A short break between study phases.
    ShortBreak,
    /// The long break after a full set of cycles.
    LongBreak,
}

impl AppStatus {
    /// All statuses in ordinal order.
    pub const ALL: [AppStatus; 4] = [
        AppStatus::Wait,
        AppStatus::Study,
        AppStatus::ShortBreak,
        AppStatus::LongBreak,
    ];

    /// Immutable (label, ordinal) pair carried by each variant.
    const fn info(self) -> (&'static str, i64) {
        match self {
            AppStatus::Wait => (STATUS_WAIT, 0),
            AppStatus::Study => (STATUS_STUDY, 1),
            AppStatus::ShortBreak => (STATUS_SHORT_BREAK, 2),
            AppStatus::LongBreak => (STATUS_LONG_BREAK, 3),
        }
    }

    /// Display string shown to the user.
    #[inline]
    pub const fn label(self) -> &'static str {
        self.info().0
    }

    /// Stable ordinal used for storage and comparison.
    #[inline]
    pub const fn value_int(self) -> i64 {
        self.info().1
    }

    /// Snake-case name used on the wire and by the console driver.
    pub const fn as_str(self) -> &'static str {
        match self {
            AppStatus::Wait => "wait",
            AppStatus::Study => "study",
            AppStatus::ShortBreak => "short_break",
            AppStatus::LongBreak => "long_break",
        }
    }

    /// Decodes a stored ordinal.
    pub fn from_value_int(value: i64) -> CoreResult<Self> {
        AppStatus::ALL
            .into_iter()
            .find(|status| status.value_int() == value)
            .ok_or(CoreError::UnknownStatusOrdinal(value))
    }
}

/// Returns true for the two break phases.
///
/// Kept as a free function so classification stays outside the type's data.
pub fn is_break(status: AppStatus) -> bool {
    matches!(status, AppStatus::ShortBreak | AppStatus::LongBreak)
}

impl std::fmt::Display for AppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AppStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");

        if let Ok(value) = normalized.parse::<i64>() {
            return AppStatus::from_value_int(value)
                .map_err(|_| CoreError::InvalidStatus(s.to_string()));
        }

        match normalized.as_str() {
            "wait" | "waiting" | "idle" => Ok(AppStatus::Wait),
            "study" | "studying" => Ok(AppStatus::Study),
            "short_break" => Ok(AppStatus::ShortBreak),
            "long_break" => Ok(AppStatus::LongBreak),
            _ => Err(CoreError::InvalidStatus(s.to_string())),
        }
    }
}

impl TryFrom<i64> for AppStatus {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        AppStatus::from_value_int(value)
    }
}
