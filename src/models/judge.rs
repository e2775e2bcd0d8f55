use serde::{Deserialize, Serialize};

/// Second-opinion verdict produced after the primary result is assembled.
///
/// Feeds back into the final confidence as a bounded adjustment, never an
/// overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeResult {
    pub is_valid: bool,
    pub confidence: f32,
    pub reasoning: String,
    pub completeness_score: f32,
    pub suggested_corrections: Vec<String>,
    pub contextual_insights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}
