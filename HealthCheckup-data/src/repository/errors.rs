use std::sync::PoisonError;
use thiserror::Error;

use crate::database::DatabaseError;

/// Error type for repository operations
///
/// Every variant is a persistence failure; absence of a row is reported through
/// `Option`/`bool` return values, never through this type.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Pool, configuration or connectivity error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Statement or transaction error
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    /// A stored row could not be mapped to the typed model
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// The blocking storage task panicked or was cancelled
    #[error("Storage task failed: {0}")]
    Task(String),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::FromSqlConversionFailure(column, _, cause) => {
                RepositoryError::InvalidData(format!("column {}: {}", column, cause))
            }
            other => RepositoryError::Sqlite(other),
        }
    }
}

impl From<r2d2::Error> for RepositoryError {
    fn from(error: r2d2::Error) -> Self {
        RepositoryError::Database(DatabaseError::Pool(error))
    }
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}
