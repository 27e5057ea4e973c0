//! # Error Types
//!
//! Domain-specific error types for pacekeeper-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pacekeeper-core errors (this file)                                    │
//! │  └── CoreError        - Status parsing / decoding failures             │
//! │                                                                         │
//! │  pacekeeper-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  App errors (apps/pacekeeper)                                          │
//! │  ├── AppError         - Initialization failures                        │
//! │  └── ApiError         - What the driver sees (serialized)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Core domain errors.
///
/// The controller's own state operations never fail; these only come from
/// turning untrusted text or stored ordinals back into an [`AppStatus`].
///
/// [`AppStatus`]: crate::AppStatus
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Text did not name a known status.
    #[error("Unknown status '{0}'. Valid options: wait, study, short_break, long_break")]
    InvalidStatus(String),

    /// A stored ordinal has no matching status.
    #[error("Unknown status ordinal: {0}")]
    UnknownStatusOrdinal(i64),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
