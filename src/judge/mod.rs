//! Second-pass validation: an independent completeness opinion over the
//! assembled result, with corrective suggestions and a human-readable
//! explanation.

pub mod explain;
pub mod heuristics;

pub use explain::*;
pub use heuristics::*;

use crate::models::JudgeResult;

/// Multiplier applied to the primary confidence when the judge agrees.
const VALID_BOOST: f32 = 1.1;
/// Multiplier when the judge flags the result, floored so a judged result
/// never drops to zero.
const INVALID_PENALTY: f32 = 0.8;
const PENALTY_FLOOR: f32 = 0.1;

/// Bounded confidence adjustment from the verdict — never an overwrite.
pub fn apply_verdict(confidence: f32, verdict: &JudgeResult) -> f32 {
    if verdict.is_valid {
        (confidence * VALID_BOOST).min(1.0)
    } else {
        (confidence * INVALID_PENALTY).max(PENALTY_FLOOR)
    }
}
