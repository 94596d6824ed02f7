//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies mirror what screening clients send; submissions stay as
//! raw JSON objects so that required-field checks can apply their own
//! truthiness rules (see [`crate::models::fields`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AppError;
use crate::vision::DEFAULT_SCREEN_DISTANCE_INCHES;

pub use crate::db::StorageSummary;
pub use crate::models::{PolicyRequestRecord, ScreeningRecord};
pub use crate::vision::VisionEvaluation;

/// Request body for `POST /evaluate_vision`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateVisionRequest {
    /// Optotypes the subject matched; only the count matters
    #[serde(default)]
    pub matched_optotypes: Option<Value>,
    /// Viewing distance in inches, as a number or numeric string
    #[serde(default)]
    pub screen_distance_inches: Option<Value>,
}

impl EvaluateVisionRequest {
    /// Number of matched optotypes.
    ///
    /// Lists and objects count their entries, strings their characters;
    /// a missing value counts as zero.
    pub fn num_correct(&self) -> Result<usize, AppError> {
        match &self.matched_optotypes {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Array(items)) => Ok(items.len()),
            Some(Value::String(s)) => Ok(s.chars().count()),
            Some(Value::Object(map)) => Ok(map.len()),
            Some(other) => Err(AppError::BadRequest(format!(
                "matched_optotypes must be a list, got {}",
                other
            ))),
        }
    }

    /// Viewing distance in inches; 16 when absent, unparsable or not finite.
    pub fn screen_distance_inches(&self) -> f64 {
        let parsed = match &self.screen_distance_inches {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|d| d.is_finite())
            .unwrap_or(DEFAULT_SCREEN_DISTANCE_INCHES)
    }
}

/// Response for `GET /optotype_test`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptotypeTestResponse {
    pub optotypes: Vec<String>,
}

/// Response for a stored submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub status: String,
    pub id: i64,
}

impl SubmissionResponse {
    pub fn success(id: impl Into<i64>) -> Self {
        Self {
            status: "success".to_string(),
            id: id.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Stored record counts, when the database answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<StorageSummary>,
}
