//! Service layer over the repository traits.
//!
//! These functions are what the HTTP handlers call. They add logging and
//! error context on top of the raw repository operations and work with any
//! backend, including `dyn FullRepository`.

use crate::db::repository::{
    PolicyRequestRepository, RepositoryResult, ScreeningRepository,
};
use crate::models::{
    NewPolicyRequest, NewScreening, PolicyRequestId, PolicyRequestRecord, ScreeningId,
    ScreeningRecord,
};

/// Record counts per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StorageSummary {
    pub screenings: u64,
    pub policy_requests: u64,
}

/// Check that the repository is reachable.
pub async fn health_check<R: ScreeningRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Create the storage schema before first use.
pub async fn init_schema<R: ScreeningRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
    repo.init_schema()
        .await
        .map_err(|e| e.with_operation("init_schema"))
}

/// Persist a screening result.
pub async fn store_screening<R: ScreeningRepository + ?Sized>(
    repo: &R,
    screening: &NewScreening,
) -> RepositoryResult<ScreeningRecord> {
    let record = repo
        .store_screening(screening)
        .await
        .map_err(|e| e.with_operation("store_screening"))?;
    log::info!(
        "Stored screening {} for school '{}'",
        record.id,
        record.school
    );
    Ok(record)
}

/// Fetch a screening result by ID.
pub async fn get_screening<R: ScreeningRepository + ?Sized>(
    repo: &R,
    id: ScreeningId,
) -> RepositoryResult<ScreeningRecord> {
    repo.get_screening(id).await
}

/// Persist a policy request.
pub async fn store_policy_request<R: PolicyRequestRepository + ?Sized>(
    repo: &R,
    request: &NewPolicyRequest,
) -> RepositoryResult<PolicyRequestRecord> {
    let record = repo
        .store_policy_request(request)
        .await
        .map_err(|e| e.with_operation("store_policy_request"))?;
    log::info!(
        "Stored policy request {} from '{}'",
        record.id,
        record.organization
    );
    Ok(record)
}

/// Fetch a policy request by ID.
pub async fn get_policy_request<R: PolicyRequestRepository + ?Sized>(
    repo: &R,
    id: PolicyRequestId,
) -> RepositoryResult<PolicyRequestRecord> {
    repo.get_policy_request(id).await
}

/// Count stored records of both kinds.
pub async fn storage_summary<R>(repo: &R) -> RepositoryResult<StorageSummary>
where
    R: ScreeningRepository + PolicyRequestRepository + ?Sized,
{
    Ok(StorageSummary {
        screenings: repo.count_screenings().await?,
        policy_requests: repo.count_policy_requests().await?,
    })
}
