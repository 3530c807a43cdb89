use thiserror::Error;

// Database modules
pub mod config;
pub mod connection;
pub mod migrations;

pub use config::DatabaseConfig;
pub use connection::DatabasePool;

/// Database error enum
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Connection error
    #[error("Failed to connect to database: {0}")]
    Connection(String),

    /// Migration error
    #[error("Database migration error: {0}")]
    Migration(String),
}
