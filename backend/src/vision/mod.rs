//! Vision screening domain logic.
//!
//! - [`acuity`]: Snellen-based prescription estimator
//! - [`evaluation`]: estimate plus acuity fraction and quality message
//! - [`optotypes`]: random optotype selection for a test

pub mod acuity;
pub mod evaluation;
pub mod optotypes;

pub use acuity::{
    estimate_prescription, round_to_quarter, snellen_denominator,
    DEFAULT_SCREEN_DISTANCE_INCHES, OPTOTYPES_PER_TEST, SNELLEN_LINES, STANDARD_DISTANCE_M,
};
pub use evaluation::{format_diopters, vision_quality, VisionEvaluation, UNABLE_TO_ESTIMATE};
pub use optotypes::{draw_optotypes, OPTOTYPES};
