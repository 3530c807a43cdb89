//! Database connection module for the HealthCheckup service
//!
//! The pool is created once at startup and handed to the repository
//! explicitly; there is no process-global handle.

use std::fs;
use std::sync::Arc;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use tracing::{error, info, warn};

use super::config::DatabaseConfig;
use super::migrations::run_sqlite_migrations;
use super::DatabaseError;

/// A pooled SQLite connection, returned to the pool when dropped
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Shared SQLite connection pool
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: Arc<r2d2::Pool<SqliteConnectionManager>>,
}

impl DatabasePool {
    /// Open the pool described by `config` and bootstrap the schema
    pub fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let path = &config.sqlite_path;
        info!("Initializing SQLite database at: {}", path.display());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating parent directory: {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::Connection(format!(
                        "cannot create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let busy_timeout = config.timeout;
        let manager = SqliteConnectionManager::file(path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
            .with_init(move |conn| conn.busy_timeout(busy_timeout));

        let pool = r2d2::Pool::builder()
            .max_size(config.pool_size.max(1))
            .connection_timeout(config.timeout)
            .build(manager)?;

        let pool = Self { pool: Arc::new(pool) };
        pool.migrate()?;

        info!("SQLite connection pool created successfully");
        Ok(pool)
    }

    /// Connect at startup, retrying transient failures
    ///
    /// Makes up to `config.connect_retries` attempts, sleeping
    /// `config.retry_interval` between them. Request handling never retries.
    pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let attempts = config.connect_retries.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            let attempt_config = config.clone();
            let result = tokio::task::spawn_blocking(move || {
                let pool = Self::connect(&attempt_config)?;
                pool.ping_blocking()?;
                Ok::<_, DatabaseError>(pool)
            })
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))
            .and_then(|result| result);

            match result {
                Ok(pool) => {
                    info!("Database connection established (attempt {}/{})", attempt, attempts);
                    return Ok(pool);
                }
                Err(e) => {
                    if attempt < attempts {
                        warn!(
                            "Database connection failed (attempt {}/{}): {}",
                            attempt, attempts, e
                        );
                        tokio::time::sleep(config.retry_interval).await;
                    } else {
                        error!("Database connection failed after {} attempts: {}", attempts, e);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DatabaseError::Connection("no connection attempt was made".to_string())
        }))
    }

    /// Check out a connection; it is returned to the pool when dropped
    pub fn get(&self) -> Result<PooledConnection, DatabaseError> {
        Ok(self.pool.get()?)
    }

    /// Run `SELECT 1` through a pooled connection
    pub fn ping_blocking(&self) -> Result<(), DatabaseError> {
        let conn = self.get()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Get information about the current database connection
    pub fn connection_info(&self) -> String {
        let state = self.pool.state();
        let location = self
            .get()
            .ok()
            .and_then(|conn| {
                conn.query_row("PRAGMA database_list", [], |row| row.get::<_, String>(2))
                    .ok()
            })
            .unwrap_or_else(|| "unknown path".to_string());

        format!(
            "SQLite database at {} (connections: active={}, idle={})",
            location, state.connections, state.idle_connections
        )
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        let conn = self.get()?;
        run_sqlite_migrations(&conn).map_err(DatabaseError::Migration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_connect_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("records.db");

        let pool = DatabasePool::connect(&DatabaseConfig::with_path(&path)).unwrap();

        assert!(path.exists());
        assert!(pool.ping_blocking().is_ok());
        assert!(pool.connection_info().contains("records.db"));
    }

    #[test]
    fn test_connect_is_idempotent_over_existing_schema() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig::with_path(dir.path().join("records.db"));

        DatabasePool::connect(&config).unwrap();
        assert!(DatabasePool::connect(&config).is_ok());
    }

    #[tokio::test]
    async fn test_connect_with_retry_gives_up() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file
        let config = DatabaseConfig {
            connect_retries: 2,
            retry_interval: Duration::from_millis(10),
            timeout: Duration::from_millis(200),
            ..DatabaseConfig::with_path(dir.path())
        };

        assert!(DatabasePool::connect_with_retry(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_connect_with_retry_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig::with_path(dir.path().join("records.db"));

        let pool = DatabasePool::connect_with_retry(&config).await.unwrap();
        assert!(pool.ping_blocking().is_ok());
    }
}
