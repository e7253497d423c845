//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (not found, write conflict,
//! backend failure) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Concurrent writers collided (lock timeout, serialization failure,
    /// deadlock, unique violation). The whole write may be retried.
    #[error("write conflict: {0}")]
    Conflict(String),

    /// SQLite statement / connection failure.
    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    /// PostgreSQL statement / connection failure.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Postgres(#[source] sqlx::Error),

    /// Could not obtain a pooled connection.
    #[error("connection pool: {0}")]
    Pool(String),

    /// Row data could not be converted into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema bootstrap failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(String),
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    /// Whether this error is a write collision worth one retry.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Custom `From<rusqlite::Error>`, not a blanket `#[from]`.
///
/// - `QueryReturnedNoRows` → `NotFound` (generic; callers remap with entity context)
/// - `SQLITE_BUSY` / `SQLITE_LOCKED` → `Conflict`
/// - Everything else → `Sqlite`
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
                return Self::Conflict(err.to_string());
            },
            _ => {},
        }
        match err {
            rusqlite::Error::QueryReturnedNoRows => Self::not_found("row", "unknown"),
            other => Self::Sqlite(other),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::Pool(err.to_string())
    }
}

/// Custom `From<sqlx::Error>`, not a blanket `#[from]`.
///
/// - `RowNotFound` → `NotFound`
/// - SQLSTATE 40001 (serialization), 40P01 (deadlock), 23505 (unique) → `Conflict`
/// - `PoolTimedOut` → `Pool`
/// - Everything else → `Postgres`
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::not_found("row", "unknown"),
            sqlx::Error::PoolTimedOut => Self::Pool(err.to_string()),
            sqlx::Error::Database(db_err)
                if db_err.code().is_some_and(|c| c == "40001" || c == "40P01" || c == "23505") =>
            {
                Self::Conflict(db_err.message().to_owned())
            },
            _ => Self::Postgres(err),
        }
    }
}

impl From<chrono::ParseError> for StorageError {
    fn from(err: chrono::ParseError) -> Self {
        Self::DataCorruption { context: "timestamp column".to_owned(), source: Box::new(err) }
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sqlite")]
    #[test]
    fn busy_sqlite_error_is_conflict() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_owned()),
        );
        assert!(StorageError::from(err).is_conflict());
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn no_rows_is_not_found() {
        assert!(StorageError::from(rusqlite::Error::QueryReturnedNoRows).is_not_found());
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = StorageError::not_found("card", 42);
        assert_eq!(err.to_string(), "not found: card with id 42");
    }
}
