//! Screening repository trait.
//!
//! Owns the storage lifecycle (schema creation, health) and the screening
//! result records.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewScreening, ScreeningId, ScreeningRecord};

/// Repository trait for screening results.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScreeningRepository: Send + Sync {
    /// Create the storage schema if it does not exist yet.
    ///
    /// Must be idempotent; callers may invoke it on every startup.
    async fn init_schema(&self) -> RepositoryResult<()>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Persist a screening result and return it with its assigned ID.
    async fn store_screening(&self, screening: &NewScreening) -> RepositoryResult<ScreeningRecord>;

    /// Fetch a stored screening result.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` if no record has this ID.
    async fn get_screening(&self, id: ScreeningId) -> RepositoryResult<ScreeningRecord>;

    /// Number of stored screening results.
    async fn count_screenings(&self) -> RepositoryResult<u64>;
}
