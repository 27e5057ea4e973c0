//! # pacekeeper-core: Pure Types for PaceKeeper
//!
//! Domain types shared by the database layer and the desktop controller.
//! Nothing in this crate touches the file system, the database or the clock
//! beyond plain `chrono` values handed in by callers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PaceKeeper Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            UI / timer driver (console driver in this repo)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          ConfigController (apps/pacekeeper)                     │   │
//! │  │    status • is_running • current_cycle • settings store         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pacekeeper-core (THIS CRATE) ★                     │   │
//! │  │   AppStatus • is_break • Settings • SessionRecord • CoreError   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`status`] - The runtime status enum and break classification
//! - [`settings`] - Key/value settings map with defaults
//! - [`types`] - Recorded session type
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pacekeeper_core::{is_break, AppStatus};
//!
//! let status: AppStatus = "short_break".parse().unwrap();
//! assert_eq!(status.value_int(), 2);
//! assert!(is_break(status));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod settings;
pub mod status;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use settings::Settings;
pub use status::{is_break, AppStatus};
pub use types::SessionRecord;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display label for [`AppStatus::Wait`].
pub const STATUS_WAIT: &str = "Waiting";

/// Display label for [`AppStatus::Study`].
pub const STATUS_STUDY: &str = "Studying";

/// Display label for [`AppStatus::ShortBreak`].
pub const STATUS_SHORT_BREAK: &str = "Short break";

/// Display label for [`AppStatus::LongBreak`].
pub const STATUS_LONG_BREAK: &str = "Long break";
