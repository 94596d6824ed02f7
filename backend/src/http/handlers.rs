//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! vision module or the storage service layer.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use qtty::Inches;
use serde_json::{Map, Value};

use super::dto::{
    EvaluateVisionRequest, HealthResponse, OptotypeTestResponse, SubmissionResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{
    NewPolicyRequest, NewScreening, PolicyRequestId, PolicyRequestRecord, ScreeningId,
    ScreeningRecord,
};
use crate::vision::{draw_optotypes, VisionEvaluation, OPTOTYPES_PER_TEST};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that create a record.
pub type CreatedResult = Result<(StatusCode, Json<SubmissionResponse>), AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and storage is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo = state.repository.as_ref();
    let db_status = match db_services::health_check(repo).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };
    let records = db_services::storage_summary(repo).await.ok();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
        records,
    }))
}

// =============================================================================
// Vision Test
// =============================================================================

fn random_optotypes() -> Vec<String> {
    draw_optotypes(&mut rand::thread_rng(), OPTOTYPES_PER_TEST)
}

/// GET /optotype_test
///
/// Draw a fresh set of distinct optotypes for one test.
pub async fn optotype_test() -> HandlerResult<OptotypeTestResponse> {
    let optotypes = random_optotypes();
    tracing::debug!("Serving optotype test {:?}", optotypes);
    Ok(Json(OptotypeTestResponse { optotypes }))
}

/// POST /evaluate_vision
///
/// Estimate a prescription from the matched optotypes and viewing distance.
pub async fn evaluate_vision(
    payload: Result<Json<EvaluateVisionRequest>, JsonRejection>,
) -> HandlerResult<VisionEvaluation> {
    let Json(request) = payload?;
    let num_correct = request.num_correct()?;
    let distance = request.screen_distance_inches();

    let evaluation =
        VisionEvaluation::evaluate(num_correct, OPTOTYPES_PER_TEST, Inches::new(distance));
    tracing::info!(
        num_correct,
        distance_inches = distance,
        estimate = ?evaluation.estimated_prescription,
        "Evaluated vision test"
    );

    Ok(Json(evaluation))
}

// =============================================================================
// Submissions
// =============================================================================

/// Object view of a submission body; anything else has no fields.
fn submission_fields(body: &Value) -> Map<String, Value> {
    body.as_object().cloned().unwrap_or_default()
}

/// POST /submit_screening
///
/// Store a screening result. Every field is required.
pub async fn submit_screening(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> CreatedResult {
    let Json(body) = payload?;
    let screening = NewScreening::from_json(&submission_fields(&body))?;

    let record = db_services::store_screening(state.repository.as_ref(), &screening).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::success(record.id)),
    ))
}

/// POST /submit_policy_request
///
/// Store a policy request. Every field is required.
pub async fn submit_policy_request(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> CreatedResult {
    let Json(body) = payload?;
    let request = NewPolicyRequest::from_json(&submission_fields(&body))?;

    let record = db_services::store_policy_request(state.repository.as_ref(), &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::success(record.id)),
    ))
}

// =============================================================================
// Record lookup
// =============================================================================

/// GET /screenings/{id}
pub async fn get_screening(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ScreeningRecord> {
    let record = db_services::get_screening(state.repository.as_ref(), ScreeningId::new(id)).await?;
    Ok(Json(record))
}

/// GET /policy_requests/{id}
pub async fn get_policy_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<PolicyRequestRecord> {
    let record =
        db_services::get_policy_request(state.repository.as_ref(), PolicyRequestId::new(id))
            .await?;
    Ok(Json(record))
}
