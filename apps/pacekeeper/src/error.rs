//! # Error Types
//!
//! Two error types live here:
//!
//! - [`AppError`]: construction and collaborator failures. Raised while the
//!   controller loads settings or initializes the database, and surfaced to
//!   the process entry point.
//! - [`ApiError`]: what a command caller sees, with a machine-readable code.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SettingsStore ── io / json ──► AppError::Settings* ──┐                │
//! │                                                        ├──► main()      │
//! │  Database::new ── DbError ────► AppError::Database ───┘   (exit 1)     │
//! │                                                                         │
//! │  command ── DbError / CoreError / AppError ──► ApiError ──► console    │
//! │                                               {"code", "message"}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use pacekeeper_core::CoreError;
use pacekeeper_db::DbError;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// App Error
// =============================================================================

/// Initialization and collaborator failures.
#[derive(Debug, Error)]
pub enum AppError {
    /// The settings file could not be read or written.
    #[error("Settings file {}: {source}", .path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file exists but is not a JSON object.
    #[error("Settings file {} is malformed: {reason}", .path.display())]
    SettingsParse { path: PathBuf, reason: String },

    /// The data-recording collaborator failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// No home directory to derive config/data locations from.
    #[error("Could not determine app config/data directory")]
    NoDataDir,

    /// Console input/output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Unknown command 'sleep'"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Settings could not be persisted
    SettingsError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts app errors to API errors.
impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Database(db) => db.into(),
            AppError::SettingsIo { .. } | AppError::SettingsParse { .. } => {
                tracing::error!(error = %err, "Settings operation failed");
                ApiError::new(ErrorCode::SettingsError, "Settings could not be saved")
            }
            other => {
                tracing::error!(error = %other, "Internal error");
                ApiError::internal("Internal error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let err = ApiError::validation("bad input");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "bad input");
    }

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let err: ApiError = DbError::not_found("Session", "abc").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Session not found: abc");
    }

    #[test]
    fn test_db_query_failure_hides_details() {
        let err: ApiError = DbError::QueryFailed("syntax error near FROM".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("syntax"));
    }

    #[test]
    fn test_settings_failure_maps_to_settings_error() {
        let err: ApiError = AppError::SettingsParse {
            path: PathBuf::from("config.json"),
            reason: "expected object".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::SettingsError);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::SettingsParse {
            path: PathBuf::from("/tmp/config.json"),
            reason: "expected object".into(),
        };
        assert_eq!(
            err.to_string(),
            "Settings file /tmp/config.json is malformed: expected object"
        );
    }
}
