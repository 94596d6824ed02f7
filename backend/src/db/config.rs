//! Database configuration and environment variable handling.

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "eyescreening.db";

/// Configuration for opening the SQLite database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    /// Database file path (or any URL `SqliteConnection` accepts)
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
    /// How long SQLite waits on a locked database before failing, in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_pool_size: 4,
            connection_timeout_sec: 30,
            max_retries: 3,
            retry_delay_ms: 100,
            busy_timeout_ms: 5_000,
        }
    }
}

impl SqliteConfig {
    /// Create configuration from environment variables.
    ///
    /// Every variable is optional; unset or unparsable values fall back to
    /// [`SqliteConfig::default`].
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("SQLITE_DATABASE_URL"))
            .unwrap_or(defaults.database_url);

        let max_pool_size = std::env::var("SQLITE_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.max_pool_size);

        let connection_timeout_sec = std::env::var("SQLITE_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.connection_timeout_sec);

        let max_retries = std::env::var("SQLITE_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.max_retries);

        let retry_delay_ms = std::env::var("SQLITE_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.retry_delay_ms);

        let busy_timeout_ms = std::env::var("SQLITE_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.busy_timeout_ms);

        Self {
            database_url,
            max_pool_size,
            connection_timeout_sec,
            max_retries,
            retry_delay_ms,
            busy_timeout_ms,
        }
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    /// Whether the URL names a private in-memory database.
    ///
    /// Every connection to such a URL opens its own empty database.
    pub fn is_in_memory(&self) -> bool {
        let url = self.database_url.trim();
        url == ":memory:" || url.starts_with("file::memory:") || url.contains("mode=memory")
    }

    /// Pool size to open; in-memory databases get a single shared connection.
    pub fn pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.max_pool_size.max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_file() {
        let config = SqliteConfig::default();
        assert_eq!(config.database_url, "eyescreening.db");
        assert_eq!(config.max_pool_size, 4);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_with_url_keeps_other_defaults() {
        let config = SqliteConfig::with_url("/tmp/screenings.db");
        assert_eq!(config.database_url, "/tmp/screenings.db");
        assert_eq!(config.retry_delay_ms, SqliteConfig::default().retry_delay_ms);
    }

    #[test]
    fn test_in_memory_database_uses_one_connection() {
        let config = SqliteConfig {
            max_pool_size: 4,
            ..SqliteConfig::with_url(":memory:")
        };
        assert!(config.is_in_memory());
        assert_eq!(config.pool_size(), 1);

        assert!(SqliteConfig::with_url("file::memory:?cache=shared").is_in_memory());
        assert!(!SqliteConfig::with_url("memory.db").is_in_memory());
        assert_eq!(SqliteConfig::with_url("memory.db").pool_size(), 4);
    }
}
