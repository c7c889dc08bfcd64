//! Core error types for habitroom-core.
//!
//! Errors fall into three buckets that presenters map to HTTP-style
//! statuses: validation failures (400), missing records (404), and
//! store/config failures (500).

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Every failure a tracker operation can report.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Bad or missing input; reported to the caller verbatim
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Store error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Output encoding failed
    #[error("Encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the SQLite record store.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("cannot open {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed or a stored value could not be decoded
    #[error("statement failed: {0}")]
    QueryFailed(String),

    #[error("schema migration failed: {0}")]
    MigrationFailed(String),

    /// Another connection holds the write lock
    #[error("database locked")]
    Locked,
}

/// Failures reading or writing `config.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("cannot write {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("bad value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("no such key: {0}")]
    UnknownKey(String),

    #[error("data directory unavailable: {0}")]
    DataDir(String),
}

/// Input rejected at the tracker boundary.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Message names the absent fields, e.g. "Name and type are required"
    #[error("{0}")]
    MissingFields(&'static str),

    /// A string did not name a known enum member or date
    #[error("'{field}' {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ValidationError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Body returned to callers when an operation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        CoreError::NotFound { entity, id }
    }

    /// HTTP-equivalent status for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::Validation(_) => 400,
            CoreError::NotFound { .. } => 404,
            _ => 500,
        }
    }

    /// Status and body for this error.
    ///
    /// Store and config failures are reported with a generic message; the
    /// underlying cause is logged rather than surfaced.
    pub fn to_response(&self) -> (u16, ErrorResponse) {
        let status = self.status_code();
        let error = match self {
            CoreError::Validation(_) | CoreError::NotFound { .. } => self.to_string(),
            other => {
                tracing::error!(error = %other, "operation failed");
                "Internal error: the operation could not be completed".to_string()
            }
        };
        (status, ErrorResponse { error })
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
                DatabaseError::Locked
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        DatabaseError::from(err).into()
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        let validation: CoreError = ValidationError::MissingFields("Title is required").into();
        assert_eq!(validation.status_code(), 400);
        assert_eq!(CoreError::not_found("Habit", 3).status_code(), 404);
        let db: CoreError = DatabaseError::Locked.into();
        assert_eq!(db.status_code(), 500);
    }

    #[test]
    fn store_failures_get_generic_message() {
        let err: CoreError = DatabaseError::QueryFailed("no such table: habits".into()).into();
        let (status, body) = err.to_response();
        assert_eq!(status, 500);
        assert!(!body.error.contains("no such table"));
    }

    #[test]
    fn validation_message_is_specific() {
        let err: CoreError = ValidationError::MissingFields("Title is required").into();
        let (_, body) = err.to_response();
        assert_eq!(body.error, "Validation error: Title is required");
    }
}
