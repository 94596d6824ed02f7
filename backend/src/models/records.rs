//! Persisted record types: screening results and policy requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::{extract_required, MissingFields};
use crate::define_id_type;

define_id_type!(i64, ScreeningId);
define_id_type!(i64, PolicyRequestId);

/// Screening result as submitted by a client, before storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScreening {
    pub student_name: String,
    pub vision_score: String,
    pub school: String,
    pub matched_optotypes: String,
    pub calculated_acuity: String,
    pub estimated_prescription: String,
}

impl NewScreening {
    pub const REQUIRED_FIELDS: [&'static str; 6] = [
        "student_name",
        "vision_score",
        "school",
        "matched_optotypes",
        "calculated_acuity",
        "estimated_prescription",
    ];

    /// Build from a JSON body, requiring every field to be present.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, MissingFields> {
        let [student_name, vision_score, school, matched_optotypes, calculated_acuity, estimated_prescription] =
            extract_required(body, &Self::REQUIRED_FIELDS)?;

        Ok(Self {
            student_name,
            vision_score,
            school,
            matched_optotypes,
            calculated_acuity,
            estimated_prescription,
        })
    }
}

/// Stored screening result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub id: ScreeningId,
    pub student_name: String,
    pub vision_score: String,
    pub school: String,
    pub matched_optotypes: String,
    pub calculated_acuity: String,
    pub estimated_prescription: String,
    pub submitted_at: DateTime<Utc>,
}

impl ScreeningRecord {
    pub fn from_new(id: ScreeningId, new: NewScreening, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            student_name: new.student_name,
            vision_score: new.vision_score,
            school: new.school,
            matched_optotypes: new.matched_optotypes,
            calculated_acuity: new.calculated_acuity,
            estimated_prescription: new.estimated_prescription,
            submitted_at,
        }
    }
}

/// Policy request as submitted by a client, before storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPolicyRequest {
    pub requester_name: String,
    pub organization: String,
    pub request_description: String,
}

impl NewPolicyRequest {
    pub const REQUIRED_FIELDS: [&'static str; 3] =
        ["requester_name", "organization", "request_description"];

    /// Build from a JSON body, requiring every field to be present.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, MissingFields> {
        let [requester_name, organization, request_description] =
            extract_required(body, &Self::REQUIRED_FIELDS)?;

        Ok(Self {
            requester_name,
            organization,
            request_description,
        })
    }
}

/// Stored policy request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRequestRecord {
    pub id: PolicyRequestId,
    pub requester_name: String,
    pub organization: String,
    pub request_description: String,
    pub submitted_at: DateTime<Utc>,
}

impl PolicyRequestRecord {
    pub fn from_new(
        id: PolicyRequestId,
        new: NewPolicyRequest,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            requester_name: new.requester_name,
            organization: new.organization,
            request_description: new.request_description,
            submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_new_screening_from_json() {
        let body = object(json!({
            "student_name": "Ana",
            "vision_score": "20/40",
            "school": "Lincoln",
            "matched_optotypes": ["E", "F", "P"],
            "calculated_acuity": 0.6,
            "estimated_prescription": "+2.50 D"
        }));

        let screening = NewScreening::from_json(&body).unwrap();
        assert_eq!(screening.student_name, "Ana");
        assert_eq!(screening.matched_optotypes, r#"["E","F","P"]"#);
        assert_eq!(screening.calculated_acuity, "0.6");
    }

    #[test]
    fn test_new_screening_missing_fields() {
        let body = object(json!({"student_name": "Ana", "school": ""}));
        let err = NewScreening::from_json(&body).unwrap_err();
        assert_eq!(
            err.fields,
            vec![
                "vision_score",
                "school",
                "matched_optotypes",
                "calculated_acuity",
                "estimated_prescription"
            ]
        );
    }

    #[test]
    fn test_new_policy_request_from_json() {
        let body = object(json!({
            "requester_name": "Dr. Lee",
            "organization": "County Health",
            "request_description": "Expand screenings"
        }));
        let request = NewPolicyRequest::from_json(&body).unwrap();
        assert_eq!(request.organization, "County Health");
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        assert_eq!(serde_json::to_value(ScreeningId::new(7)).unwrap(), json!(7));
        assert_eq!(PolicyRequestId::from(3).to_string(), "3");
        assert_eq!(i64::from(PolicyRequestId::new(9)), 9);
    }
}
