//! Screening evaluation: the estimate together with its presentation.

use qtty::Inches;
use serde::{Deserialize, Serialize};

use super::acuity::estimate_prescription;

/// Message shown when no estimate can be made.
pub const UNABLE_TO_ESTIMATE: &str = "Unable to estimate prescription. Please try again.";

/// Outcome of one optotype-matching attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionEvaluation {
    /// Fraction of optotypes matched, in `[0, 1]` for ordinary input.
    pub calculated_acuity: f64,
    /// Quarter-diopter estimate, `None` when nothing was matched.
    pub estimated_prescription: Option<f64>,
    /// Human-readable summary of the estimate.
    pub vision_quality: String,
}

impl VisionEvaluation {
    /// Evaluate a screening attempt.
    pub fn evaluate(num_correct: usize, total_optotypes: usize, screen_distance: Inches) -> Self {
        let estimated_prescription =
            estimate_prescription(num_correct, total_optotypes, screen_distance);

        Self {
            calculated_acuity: calculated_acuity(num_correct, total_optotypes),
            estimated_prescription,
            vision_quality: vision_quality(estimated_prescription),
        }
    }
}

/// Plain fraction of matched optotypes. An empty test reports `0.0`.
pub fn calculated_acuity(num_correct: usize, total_optotypes: usize) -> f64 {
    if total_optotypes == 0 {
        return 0.0;
    }
    num_correct as f64 / total_optotypes as f64
}

/// Signed diopter value with two decimals, e.g. `+0.25 D` or `-1.50 D`.
pub fn format_diopters(diopters: f64) -> String {
    // -0.0 would otherwise print with a minus sign
    let diopters = if diopters == 0.0 { 0.0 } else { diopters };
    format!("{:+.2} D", diopters)
}

/// Quality message for an optional estimate.
pub fn vision_quality(estimate: Option<f64>) -> String {
    match estimate {
        Some(diopters) => format!("Estimated prescription: {}", format_diopters(diopters)),
        None => UNABLE_TO_ESTIMATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_diopters_sign_and_precision() {
        assert_eq!(format_diopters(0.25), "+0.25 D");
        assert_eq!(format_diopters(-1.5), "-1.50 D");
        assert_eq!(format_diopters(2.0), "+2.00 D");
        assert_eq!(format_diopters(0.0), "+0.00 D");
        assert_eq!(format_diopters(-0.0), "+0.00 D");
    }

    #[test]
    fn test_vision_quality_messages() {
        assert_eq!(vision_quality(None), UNABLE_TO_ESTIMATE);
        assert_eq!(
            vision_quality(Some(2.5)),
            "Estimated prescription: +2.50 D"
        );
    }

    #[test]
    fn test_calculated_acuity() {
        assert_eq!(calculated_acuity(0, 5), 0.0);
        assert_eq!(calculated_acuity(4, 5), 0.8);
        assert_eq!(calculated_acuity(5, 5), 1.0);
        assert_eq!(calculated_acuity(3, 0), 0.0);
    }

    #[test]
    fn test_evaluate_full_match() {
        let eval = VisionEvaluation::evaluate(5, 5, Inches::new(16.0));
        assert_eq!(eval.calculated_acuity, 1.0);
        assert_eq!(eval.estimated_prescription, Some(2.5));
        assert_eq!(eval.vision_quality, "Estimated prescription: +2.50 D");
    }

    #[test]
    fn test_evaluate_no_match() {
        let eval = VisionEvaluation::evaluate(0, 5, Inches::new(16.0));
        assert_eq!(eval.calculated_acuity, 0.0);
        assert_eq!(eval.estimated_prescription, None);
        assert_eq!(eval.vision_quality, UNABLE_TO_ESTIMATE);
    }

    #[test]
    fn test_evaluation_serializes_missing_estimate_as_null() {
        let eval = VisionEvaluation::evaluate(0, 5, Inches::new(16.0));
        let json = serde_json::to_value(&eval).unwrap();
        assert!(json["estimated_prescription"].is_null());
        assert_eq!(json["calculated_acuity"], 0.0);
    }
}
