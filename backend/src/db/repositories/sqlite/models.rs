use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{eye_screenings, policy_requests};
use crate::models::{
    NewPolicyRequest, NewScreening, PolicyRequestId, PolicyRequestRecord, ScreeningId,
    ScreeningRecord,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = eye_screenings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScreeningRow {
    pub id: i64,
    pub student_name: String,
    pub vision_score: String,
    pub school: String,
    pub matched_optotypes: String,
    pub calculated_acuity: String,
    pub estimated_prescription: String,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = eye_screenings)]
pub struct NewScreeningRow {
    pub student_name: String,
    pub vision_score: String,
    pub school: String,
    pub matched_optotypes: String,
    pub calculated_acuity: String,
    pub estimated_prescription: String,
    pub submitted_at: NaiveDateTime,
}

impl NewScreeningRow {
    pub fn new(screening: &NewScreening, submitted_at: NaiveDateTime) -> Self {
        Self {
            student_name: screening.student_name.clone(),
            vision_score: screening.vision_score.clone(),
            school: screening.school.clone(),
            matched_optotypes: screening.matched_optotypes.clone(),
            calculated_acuity: screening.calculated_acuity.clone(),
            estimated_prescription: screening.estimated_prescription.clone(),
            submitted_at,
        }
    }
}

impl From<ScreeningRow> for ScreeningRecord {
    fn from(row: ScreeningRow) -> Self {
        Self {
            id: ScreeningId::new(row.id),
            student_name: row.student_name,
            vision_score: row.vision_score,
            school: row.school,
            matched_optotypes: row.matched_optotypes,
            calculated_acuity: row.calculated_acuity,
            estimated_prescription: row.estimated_prescription,
            submitted_at: row.submitted_at.and_utc(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = policy_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PolicyRequestRow {
    pub id: i64,
    pub requester_name: String,
    pub organization: String,
    pub request_description: String,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = policy_requests)]
pub struct NewPolicyRequestRow {
    pub requester_name: String,
    pub organization: String,
    pub request_description: String,
    pub submitted_at: NaiveDateTime,
}

impl NewPolicyRequestRow {
    pub fn new(request: &NewPolicyRequest, submitted_at: NaiveDateTime) -> Self {
        Self {
            requester_name: request.requester_name.clone(),
            organization: request.organization.clone(),
            request_description: request.request_description.clone(),
            submitted_at,
        }
    }
}

impl From<PolicyRequestRow> for PolicyRequestRecord {
    fn from(row: PolicyRequestRow) -> Self {
        Self {
            id: PolicyRequestId::new(row.id),
            requester_name: row.requester_name,
            organization: row.organization,
            request_description: row.request_description,
            submitted_at: row.submitted_at.and_utc(),
        }
    }
}
