//! Tests for LocalRepository.
//!
//! These tests cover ID assignment, lookups, concurrent writers and the
//! service-layer wrappers over the in-memory repository.

use std::sync::Arc;

use eyescreen::db::repositories::LocalRepository;
use eyescreen::db::repository::{PolicyRequestRepository, ScreeningRepository};
use eyescreen::db::services;
use eyescreen::models::{NewPolicyRequest, NewScreening, PolicyRequestId, ScreeningId};

fn sample_screening(student: &str) -> NewScreening {
    NewScreening {
        student_name: student.to_string(),
        vision_score: "4/5".to_string(),
        school: "Lincoln Elementary".to_string(),
        matched_optotypes: "E,F,P,T".to_string(),
        calculated_acuity: "0.8".to_string(),
        estimated_prescription: "Estimated prescription: +2.50 D".to_string(),
    }
}

fn sample_policy_request(requester: &str) -> NewPolicyRequest {
    NewPolicyRequest {
        requester_name: requester.to_string(),
        organization: "District 9".to_string(),
        request_description: "Annual screening for grades 1-3".to_string(),
    }
}

#[tokio::test]
async fn test_ids_start_at_one_and_increase() {
    let repo = LocalRepository::new();

    let first = repo.store_screening(&sample_screening("Ana")).await.unwrap();
    let second = repo.store_screening(&sample_screening("Ben")).await.unwrap();

    assert_eq!(first.id, ScreeningId::new(1));
    assert_eq!(second.id, ScreeningId::new(2));
}

#[tokio::test]
async fn test_record_kinds_have_independent_ids() {
    let repo = LocalRepository::new();

    repo.store_screening(&sample_screening("Ana")).await.unwrap();
    repo.store_screening(&sample_screening("Ben")).await.unwrap();
    let request = repo
        .store_policy_request(&sample_policy_request("Dr. Ruiz"))
        .await
        .unwrap();

    assert_eq!(request.id, PolicyRequestId::new(1));
}

#[tokio::test]
async fn test_get_after_store_round_trips() {
    let repo = LocalRepository::new();
    let new = sample_screening("Ana");

    let stored = repo.store_screening(&new).await.unwrap();
    let fetched = repo.get_screening(stored.id).await.unwrap();

    assert_eq!(fetched, stored);
    assert_eq!(fetched.student_name, new.student_name);
    assert_eq!(fetched.estimated_prescription, new.estimated_prescription);
}

#[tokio::test]
async fn test_policy_request_round_trip() {
    let repo = LocalRepository::new();

    let stored = repo
        .store_policy_request(&sample_policy_request("Dr. Ruiz"))
        .await
        .unwrap();
    let fetched = repo.get_policy_request(stored.id).await.unwrap();

    assert_eq!(fetched.requester_name, "Dr. Ruiz");
    assert_eq!(fetched.organization, "District 9");
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let repo = LocalRepository::new();

    let err = repo.get_screening(ScreeningId::new(42)).await.unwrap_err();
    assert!(err.is_not_found());

    let err = repo
        .get_policy_request(PolicyRequestId::new(7))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_clear_restarts_ids() {
    let repo = LocalRepository::new();
    repo.store_screening(&sample_screening("Ana")).await.unwrap();
    repo.clear();

    assert_eq!(repo.count_screenings().await.unwrap(), 0);
    let record = repo.store_screening(&sample_screening("Ben")).await.unwrap();
    assert_eq!(record.id, ScreeningId::new(1));
}

#[tokio::test]
async fn test_concurrent_stores_get_unique_ids() {
    let repo = Arc::new(LocalRepository::new());

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.store_screening(&sample_screening(&format!("student_{}", i)))
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().value());
    }
    ids.sort_unstable();

    assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
    assert_eq!(repo.count_screenings().await.unwrap(), 20);
}

#[tokio::test]
async fn test_services_storage_summary() {
    let repo = LocalRepository::new();
    services::init_schema(&repo).await.unwrap();

    services::store_screening(&repo, &sample_screening("Ana"))
        .await
        .unwrap();
    services::store_policy_request(&repo, &sample_policy_request("Dr. Ruiz"))
        .await
        .unwrap();
    services::store_policy_request(&repo, &sample_policy_request("Ms. Chen"))
        .await
        .unwrap();

    let summary = services::storage_summary(&repo).await.unwrap();
    assert_eq!(summary.screenings, 1);
    assert_eq!(summary.policy_requests, 2);
    assert!(services::health_check(&repo).await.unwrap());
}
