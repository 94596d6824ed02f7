//! SQLite repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures (`database is locked`)
//! - Embedded schema migrations, run at construction and by `init_schema`
//! - Query counters for monitoring
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `SQLITE_DATABASE_URL`: database file path (default: `eyescreening.db`)
//! - `SQLITE_POOL_MAX`: Maximum pool size (default: 4)
//! - `SQLITE_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `SQLITE_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `SQLITE_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)
//! - `SQLITE_BUSY_TIMEOUT_MS`: Wait on a locked database before failing (default: 5000)
//!
//! An in-memory URL (`:memory:`) is served by a single long-lived connection,
//! since each SQLite connection to it would see a separate database.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::db::config::SqliteConfig;
use crate::db::repository::{
    ErrorContext, PolicyRequestRepository, RepositoryError, RepositoryResult,
    ScreeningRepository,
};
use crate::models::{
    NewPolicyRequest, NewScreening, PolicyRequestId, PolicyRequestRecord, ScreeningId,
    ScreeningRecord,
};

mod models;
mod schema;

use models::*;
use schema::*;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/sqlite/migrations");

/// Per-connection settings applied when the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        sql_query(format!(
            "PRAGMA busy_timeout = {}",
            self.busy_timeout.as_millis()
        ))
        .execute(conn)
        .map(|_| ())
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed repository for SQLite.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
    config: SqliteConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    retried_operations: Arc<AtomicU64>,
}

impl std::fmt::Debug for SqliteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRepository")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SqliteRepository {
    /// Open the database and run pending migrations.
    pub fn new(config: SqliteConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);

        let mut builder = Pool::builder()
            .max_size(config.pool_size())
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .test_on_check_out(true)
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            }));
        if config.is_in_memory() {
            // Recycling the only connection would drop the database
            builder = builder.idle_timeout(None).max_lifetime(None);
        }

        let pool = builder
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("database_url={}", config.database_url)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        log::info!("SQLite repository ready at {}", config.database_url);

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            retried_operations: Arc::new(AtomicU64::new(0)),
        })
    }

    fn run_migrations(conn: &mut SqliteConnection) -> RepositoryResult<()> {
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        if !applied.is_empty() {
            log::info!("Applied {} SQLite migration(s)", applied.len());
        }
        Ok(())
    }

    /// Execute a database operation on the blocking pool, retrying transient
    /// failures with exponential backoff.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1)),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        log::warn!("Retrying SQLite operation after: {}", e);
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Pool state and query counters.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            max_size: self.config.pool_size(),
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl ScreeningRepository for SqliteRepository {
    async fn init_schema(&self) -> RepositoryResult<()> {
        self.with_conn(|conn| Self::run_migrations(conn)).await
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn store_screening(&self, screening: &NewScreening) -> RepositoryResult<ScreeningRecord> {
        let row = NewScreeningRow::new(screening, Utc::now().naive_utc());
        self.with_conn(move |conn| {
            diesel::insert_into(eye_screenings::table)
                .values(&row)
                .returning(ScreeningRow::as_returning())
                .get_result::<ScreeningRow>(conn)
                .map(ScreeningRecord::from)
                .map_err(|e| map_diesel_error(e).with_operation("store_screening"))
        })
        .await
    }

    async fn get_screening(&self, id: ScreeningId) -> RepositoryResult<ScreeningRecord> {
        self.with_conn(move |conn| {
            eye_screenings::table
                .find(id.value())
                .select(ScreeningRow::as_select())
                .first::<ScreeningRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(ScreeningRecord::from)
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        format!("Screening {} not found", id),
                        ErrorContext::new("get_screening")
                            .with_entity("screening")
                            .with_entity_id(id),
                    )
                })
        })
        .await
    }

    async fn count_screenings(&self) -> RepositoryResult<u64> {
        self.with_conn(|conn| {
            eye_screenings::table
                .count()
                .get_result::<i64>(conn)
                .map(|n| n as u64)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[async_trait]
impl PolicyRequestRepository for SqliteRepository {
    async fn store_policy_request(
        &self,
        request: &NewPolicyRequest,
    ) -> RepositoryResult<PolicyRequestRecord> {
        let row = NewPolicyRequestRow::new(request, Utc::now().naive_utc());
        self.with_conn(move |conn| {
            diesel::insert_into(policy_requests::table)
                .values(&row)
                .returning(PolicyRequestRow::as_returning())
                .get_result::<PolicyRequestRow>(conn)
                .map(PolicyRequestRecord::from)
                .map_err(|e| map_diesel_error(e).with_operation("store_policy_request"))
        })
        .await
    }

    async fn get_policy_request(
        &self,
        id: PolicyRequestId,
    ) -> RepositoryResult<PolicyRequestRecord> {
        self.with_conn(move |conn| {
            policy_requests::table
                .find(id.value())
                .select(PolicyRequestRow::as_select())
                .first::<PolicyRequestRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(PolicyRequestRecord::from)
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        format!("Policy request {} not found", id),
                        ErrorContext::new("get_policy_request")
                            .with_entity("policy_request")
                            .with_entity_id(id),
                    )
                })
        })
        .await
    }

    async fn count_policy_requests(&self) -> RepositoryResult<u64> {
        self.with_conn(|conn| {
            policy_requests::table
                .count()
                .get_result::<i64>(conn)
                .map(|n| n as u64)
                .map_err(map_diesel_error)
        })
        .await
    }
}
