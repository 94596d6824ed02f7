//! In-memory repository for unit testing and local development.
//!
//! Records live in ordered maps behind a single `parking_lot::RwLock`. IDs
//! are assigned per record kind starting at 1, matching the auto-increment
//! behaviour of the SQL backend.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::db::repository::{
    ErrorContext, PolicyRequestRepository, RepositoryError, RepositoryResult,
    ScreeningRepository,
};
use crate::models::{
    NewPolicyRequest, NewScreening, PolicyRequestId, PolicyRequestRecord, ScreeningId,
    ScreeningRecord,
};

#[derive(Debug, Default)]
struct LocalData {
    screenings: BTreeMap<ScreeningId, ScreeningRecord>,
    policy_requests: BTreeMap<PolicyRequestId, PolicyRequestRecord>,
    next_screening_id: i64,
    next_policy_request_id: i64,
}

/// In-memory repository.
#[derive(Debug, Default)]
pub struct LocalRepository {
    data: RwLock<LocalData>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every stored record and restart ID assignment.
    pub fn clear(&self) {
        *self.data.write() = LocalData::default();
    }
}

#[async_trait]
impl ScreeningRepository for LocalRepository {
    async fn init_schema(&self) -> RepositoryResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn store_screening(&self, screening: &NewScreening) -> RepositoryResult<ScreeningRecord> {
        let mut data = self.data.write();
        data.next_screening_id += 1;
        let id = ScreeningId::new(data.next_screening_id);

        let record = ScreeningRecord::from_new(id, screening.clone(), Utc::now());
        data.screenings.insert(id, record.clone());
        Ok(record)
    }

    async fn get_screening(&self, id: ScreeningId) -> RepositoryResult<ScreeningRecord> {
        self.data.read().screenings.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Screening {} not found", id),
                ErrorContext::new("get_screening")
                    .with_entity("screening")
                    .with_entity_id(id),
            )
        })
    }

    async fn count_screenings(&self) -> RepositoryResult<u64> {
        Ok(self.data.read().screenings.len() as u64)
    }
}

#[async_trait]
impl PolicyRequestRepository for LocalRepository {
    async fn store_policy_request(
        &self,
        request: &NewPolicyRequest,
    ) -> RepositoryResult<PolicyRequestRecord> {
        let mut data = self.data.write();
        data.next_policy_request_id += 1;
        let id = PolicyRequestId::new(data.next_policy_request_id);

        let record = PolicyRequestRecord::from_new(id, request.clone(), Utc::now());
        data.policy_requests.insert(id, record.clone());
        Ok(record)
    }

    async fn get_policy_request(
        &self,
        id: PolicyRequestId,
    ) -> RepositoryResult<PolicyRequestRecord> {
        self.data
            .read()
            .policy_requests
            .get(&id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Policy request {} not found", id),
                    ErrorContext::new("get_policy_request")
                        .with_entity("policy_request")
                        .with_entity_id(id),
                )
            })
    }

    async fn count_policy_requests(&self) -> RepositoryResult<u64> {
        Ok(self.data.read().policy_requests.len() as u64)
    }
}
