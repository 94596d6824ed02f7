//! End-to-end tests for the HTTP router over an in-memory repository.

#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use eyescreen::db::repositories::LocalRepository;
use eyescreen::db::repository::FullRepository;
use eyescreen::http::{create_router, AppState};
use eyescreen::vision::OPTOTYPES;

fn app() -> Router {
    let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
    create_router(AppState::new(repo))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn screening_body() -> Value {
    json!({
        "student_name": "Ana",
        "vision_score": "5/5",
        "school": "Lincoln Elementary",
        "matched_optotypes": ["E", "F", "P", "T", "O"],
        "calculated_acuity": 1.0,
        "estimated_prescription": "Estimated prescription: +2.50 D"
    })
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["records"]["screenings"], 0);
}

#[tokio::test]
async fn test_optotype_test_draws_five_distinct_symbols() {
    let app = app();
    let (status, body) = send(&app, get("/optotype_test")).await;

    assert_eq!(status, StatusCode::OK);
    let optotypes: Vec<String> = serde_json::from_value(body["optotypes"].clone()).unwrap();
    assert_eq!(optotypes.len(), 5);
    for symbol in &optotypes {
        assert!(OPTOTYPES.contains(&symbol.as_str()));
    }
    let mut unique = optotypes.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 5);
}

#[tokio::test]
async fn test_evaluate_vision_all_matched_default_distance() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/evaluate_vision",
            r#"{"matched_optotypes": ["E", "F", "P", "T", "O"]}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calculated_acuity"].as_f64(), Some(1.0));
    assert_eq!(body["estimated_prescription"].as_f64(), Some(2.5));
    assert_eq!(body["vision_quality"], "Estimated prescription: +2.50 D");
}

#[tokio::test]
async fn test_evaluate_vision_nothing_matched() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/evaluate_vision", r#"{"matched_optotypes": []}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calculated_acuity"].as_f64(), Some(0.0));
    assert!(body["estimated_prescription"].is_null());
    assert_eq!(
        body["vision_quality"],
        "Unable to estimate prescription. Please try again."
    );
}

#[tokio::test]
async fn test_evaluate_vision_distance_as_string() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/evaluate_vision",
            r#"{"matched_optotypes": ["E", "F"], "screen_distance_inches": "16"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calculated_acuity"].as_f64(), Some(0.4));
    assert_eq!(body["estimated_prescription"].as_f64(), Some(2.5));
}

#[tokio::test]
async fn test_evaluate_vision_tiny_distance_keeps_message_and_value_in_step() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/evaluate_vision",
            r#"{"matched_optotypes": ["E", "F", "P"], "screen_distance_inches": 1e-320}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estimated_prescription"].as_f64(), Some(0.0));
    assert_eq!(body["vision_quality"], "Estimated prescription: +0.00 D");
}

#[tokio::test]
async fn test_evaluate_vision_rejects_malformed_json() {
    let app = app();
    let (status, _) = send(&app, post_json("/evaluate_vision", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_evaluate_vision_rejects_numeric_matches() {
    let app = app();
    let (status, _) = send(
        &app,
        post_json("/evaluate_vision", r#"{"matched_optotypes": 4}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_screening_then_fetch() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/submit_screening", &screening_body().to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"status": "success", "id": 1}));

    let (status, record) = send(&app, get("/screenings/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["student_name"], "Ana");
    assert_eq!(record["matched_optotypes"], r#"["E","F","P","T","O"]"#);
    assert_eq!(record["calculated_acuity"], "1.0");
}

#[tokio::test]
async fn test_submit_screening_missing_field() {
    let app = app();
    let mut body = screening_body();
    body["school"] = json!("");

    let (status, response) =
        send(&app, post_json("/submit_screening", &body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Missing required fields");
    assert_eq!(response["details"], "school");
}

#[tokio::test]
async fn test_submit_screening_non_object_body() {
    let app = app();
    let (status, response) = send(&app, post_json("/submit_screening", "[1, 2, 3]")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Missing required fields");
}

#[tokio::test]
async fn test_submit_policy_request() {
    let app = app();
    let request = json!({
        "requester_name": "Dr. Ruiz",
        "organization": "District 9",
        "request_description": "Screen grades 1-3"
    });

    let (status, body) = send(
        &app,
        post_json("/submit_policy_request", &request.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["id"], 1);

    let (status, record) = send(&app, get("/policy_requests/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["organization"], "District 9");
}

#[tokio::test]
async fn test_submit_policy_request_missing_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/submit_policy_request", r#"{"requester_name": "Dr. Ruiz"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn test_unknown_records_are_404() {
    let app = app();

    let (status, body) = send(&app, get("/screenings/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, get("/policy_requests/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
