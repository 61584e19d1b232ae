//! Error types for messenger-store
//!
//! This module provides the error taxonomy shared by schema provisioning,
//! seeding, mutations and queries.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Schema, index or pragma setup failed; the store is unusable
    #[error("Provisioning error: {0}")]
    Provisioning(String),

    /// A write violated a foreign key, uniqueness or not-null constraint
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Storage engine failures (busy, locked, I/O)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Caller supplied an offset or limit outside its domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite database errors that retrying will not fix
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Classify a rusqlite failure raised while running `context`.
    ///
    /// Constraint failures become [`StoreError::ConstraintViolation`], busy,
    /// locked and I/O failures become [`StoreError::Storage`]. Everything else
    /// (corruption, full disk, read-only file, bad SQL, type mismatches) is
    /// kept as [`StoreError::Database`].
    pub fn from_sqlite(context: &str, err: rusqlite::Error) -> Self {
        match sqlite_code(&err) {
            Some(ErrorCode::ConstraintViolation) => {
                StoreError::ConstraintViolation(format!("{}: {}", context, err))
            }
            Some(code) if is_transient_code(code) => StoreError::Storage(format!("{}: {}", context, err)),
            _ => {
                log::debug!("{}: {}", context, err);
                StoreError::Database(err)
            }
        }
    }

    /// True when the store was only temporarily unavailable and the
    /// embedding application may retry.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Storage(_) => true,
            StoreError::Database(err) => sqlite_code(err).is_some_and(is_transient_code),
            _ => false,
        }
    }
}

fn sqlite_code(err: &rusqlite::Error) -> Option<ErrorCode> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => Some(failure.code),
        _ => None,
    }
}

fn is_transient_code(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::SystemIoFailure
    )
}
