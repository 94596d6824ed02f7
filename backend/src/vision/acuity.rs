//! Acuity estimator.
//!
//! Converts the number of correctly matched optotypes and the viewing distance
//! into a rough refractive correction in diopters. The model compares the
//! vergence of the near viewing distance with the vergence needed to resolve
//! the matched Snellen line at the standard 20 ft testing distance:
//!
//! ```text
//! D = 1 / d_view - 1 / (d_std * denominator / 20)
//! ```
//!
//! The result is rounded to the nearest quarter diopter. This is a heuristic,
//! not a clinical measurement.

use qtty::{Inches, Meter, Meters};

/// Snellen chart denominators, ordered from worst to best acuity.
pub const SNELLEN_LINES: [u32; 10] = [200, 100, 70, 50, 40, 30, 25, 20, 15, 10];

/// Standard testing distance (20 ft) in meters.
pub const STANDARD_DISTANCE_M: f64 = 6.096;

/// Viewing distance used when the caller does not provide one.
pub const DEFAULT_SCREEN_DISTANCE_INCHES: f64 = 16.0;

/// Number of optotypes presented in one screening attempt.
pub const OPTOTYPES_PER_TEST: usize = 5;

/// Snellen denominator for the line reached with `num_correct` matches.
///
/// Returns `None` for zero matches. Counts beyond the table length clamp to the
/// best line.
pub fn snellen_denominator(num_correct: usize) -> Option<u32> {
    if num_correct == 0 {
        return None;
    }
    let line_index = (num_correct - 1).min(SNELLEN_LINES.len() - 1);
    Some(SNELLEN_LINES[line_index])
}

/// Estimate the corrective power in diopters.
///
/// The total number of optotypes shown is part of the screening contract but
/// does not enter the estimate. Zero matches yield `None`. A viewing distance
/// too small to invert (zero, or so close to zero that the power overflows)
/// yields `0.0`.
pub fn estimate_prescription(
    num_correct: usize,
    _total_optotypes: usize,
    screen_distance: Inches,
) -> Option<f64> {
    let denominator = snellen_denominator(num_correct)?;

    let distance: Meters = screen_distance.to::<Meter>();
    if distance.value() == 0.0 {
        return Some(0.0);
    }

    let diopters =
        (1.0 / distance.value()) - (1.0 / (STANDARD_DISTANCE_M * f64::from(denominator) / 20.0));
    let rounded = round_to_quarter(diopters);

    Some(if rounded.is_finite() { rounded } else { 0.0 })
}

/// Round to the nearest quarter diopter, ties away from zero.
///
/// Zero is always returned as positive zero so that it formats as `+0.00`.
pub fn round_to_quarter(diopters: f64) -> f64 {
    let rounded = (diopters * 4.0).round() / 4.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
