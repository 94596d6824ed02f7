//! Policy request repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewPolicyRequest, PolicyRequestId, PolicyRequestRecord};

/// Repository trait for policy requests.
#[async_trait]
pub trait PolicyRequestRepository: Send + Sync {
    /// Persist a policy request and return it with its assigned ID.
    async fn store_policy_request(
        &self,
        request: &NewPolicyRequest,
    ) -> RepositoryResult<PolicyRequestRecord>;

    /// Fetch a stored policy request.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` if no record has this ID.
    async fn get_policy_request(&self, id: PolicyRequestId)
        -> RepositoryResult<PolicyRequestRecord>;

    /// Number of stored policy requests.
    async fn count_policy_requests(&self) -> RepositoryResult<u64>;
}
