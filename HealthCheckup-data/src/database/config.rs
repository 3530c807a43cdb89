//! Database configuration loaded from the process environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default location of the SQLite database file
pub const DEFAULT_SQLITE_PATH: &str = "data/health_checkup.db";

/// Database configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub sqlite_path: PathBuf,
    /// Maximum number of pooled connections
    pub pool_size: u32,
    /// Connection acquire timeout, also used as the SQLite busy timeout
    pub timeout: Duration,
    /// Number of connection attempts made at startup
    pub connect_retries: u32,
    /// Delay between startup connection attempts
    pub retry_interval: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from(DEFAULT_SQLITE_PATH),
            pool_size: 5,
            timeout: Duration::from_secs(5),
            connect_retries: 5,
            retry_interval: Duration::from_secs(5),
        }
    }
}

impl DatabaseConfig {
    /// Create a configuration for a specific database file, other settings default
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            sqlite_path: path.into(),
            ..Self::default()
        }
    }

    /// Create a new database configuration from environment variables
    ///
    /// `DATABASE_URL` takes precedence over `DB_SQLITE_PATH`. Unparseable numeric
    /// settings fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let sqlite_path = env::var("DATABASE_URL")
            .or_else(|_| env::var("DB_SQLITE_PATH"))
            .map(|value| PathBuf::from(strip_sqlite_scheme(&value)))
            .unwrap_or(defaults.sqlite_path);

        let pool_size = env_or("DB_POOL_SIZE", defaults.pool_size);
        let timeout = Duration::from_secs(env_or("DB_TIMEOUT_SECONDS", defaults.timeout.as_secs()));
        let connect_retries = env_or("DB_CONNECT_RETRIES", defaults.connect_retries);
        let retry_interval = Duration::from_secs(env_or(
            "DB_RETRY_INTERVAL_SECONDS",
            defaults.retry_interval.as_secs(),
        ));

        info!(
            "Database configuration: path={}, pool_size={}, timeout={}s, retries={}, retry_interval={}s",
            sqlite_path.display(),
            pool_size,
            timeout.as_secs(),
            connect_retries,
            retry_interval.as_secs()
        );

        Self {
            sqlite_path,
            pool_size,
            timeout,
            connect_retries,
            retry_interval,
        }
    }
}

fn strip_sqlite_scheme(value: &str) -> &str {
    value
        .strip_prefix("sqlite://")
        .or_else(|| value.strip_prefix("sqlite:"))
        .unwrap_or(value)
}

fn env_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.sqlite_path, PathBuf::from(DEFAULT_SQLITE_PATH));
        assert_eq!(config.pool_size, 5);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.connect_retries, 5);
    }

    #[test]
    fn test_strip_sqlite_scheme() {
        assert_eq!(strip_sqlite_scheme("sqlite://data/x.db"), "data/x.db");
        assert_eq!(strip_sqlite_scheme("sqlite:x.db"), "x.db");
        assert_eq!(strip_sqlite_scheme("/var/lib/x.db"), "/var/lib/x.db");
    }

    #[test]
    fn test_with_path_keeps_other_defaults() {
        let config = DatabaseConfig::with_path("/tmp/records.db");
        assert_eq!(config.sqlite_path, PathBuf::from("/tmp/records.db"));
        assert_eq!(config.pool_size, DatabaseConfig::default().pool_size);
    }
}
