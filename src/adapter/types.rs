use serde::{Deserialize, Serialize};

use super::AdapterError;
use crate::models::Entity;

/// One classifier candidate with its score, sorted descending in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLabel {
    pub label: String,
    pub score: f32,
}

impl RankedLabel {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score: score.clamp(0.0, 1.0),
        }
    }

    /// Fallback ranking entry when a response shape is unrecognized.
    pub fn neutral() -> Self {
        Self::new("unknown", 0.5)
    }
}

/// Candidate category phrases handed to the zero-shot classifier. The
/// type mapper's substring rules key off these words.
pub const DEFAULT_CANDIDATE_LABELS: &[&str] = &[
    "temporal scheduling restriction",
    "capacity limitation",
    "location or venue requirement",
    "rest period requirement",
    "soft scheduling preference",
];

/// Zero-shot semantic intent classification over candidate phrases.
pub trait IntentClassifier: Send + Sync {
    fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<Vec<RankedLabel>, AdapterError>;
}

/// Named-entity recognition. Results are unioned with the lexical
/// library's output, never substituted for it.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, AdapterError>;
}

/// Free-text generation, used only for explanations and best-effort
/// schema correction.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, AdapterError>;
}
