//! Parser configuration: which external capabilities are enabled and how
//! to reach them. Everything is optional — an empty config builds the
//! fully local rule-based parser.

use serde::{Deserialize, Serialize};

use crate::adapter::{HfInferenceClient, DEFAULT_CANDIDATE_LABELS};
use crate::orchestrator::ConstraintParser;

/// Default per-call timeout for hosted inference requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Zero-shot classification endpoint, e.g. a hosted bart-large-mnli.
    pub classification_endpoint: Option<String>,
    /// Token-classification (NER) endpoint.
    pub ner_endpoint: Option<String>,
    /// Text-generation endpoint for explanations and schema correction.
    pub generation_endpoint: Option<String>,
    /// Bearer token shared by all endpoints.
    pub api_token: Option<String>,
    pub timeout_secs: u64,
    /// Candidate category phrases handed to the classifier.
    pub candidate_labels: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            classification_endpoint: None,
            ner_endpoint: None,
            generation_endpoint: None,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            candidate_labels: DEFAULT_CANDIDATE_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ParserConfig {
    /// Config for the fully local path — no endpoints at all.
    pub fn rule_based() -> Self {
        Self::default()
    }

    /// Wire up a parser from this config. Each configured endpoint gets
    /// its own shared blocking client; absent endpoints leave the
    /// corresponding rule-based path in charge.
    pub fn build(&self) -> ConstraintParser {
        let token = self.api_token.as_deref();
        let mut parser =
            ConstraintParser::rule_based().with_candidate_labels(self.candidate_labels.clone());

        if let Some(endpoint) = &self.classification_endpoint {
            parser = parser.with_classifier(Box::new(HfInferenceClient::new(
                endpoint,
                token,
                self.timeout_secs,
            )));
        }
        if let Some(endpoint) = &self.ner_endpoint {
            parser = parser.with_recognizer(Box::new(HfInferenceClient::new(
                endpoint,
                token,
                self.timeout_secs,
            )));
        }
        if let Some(endpoint) = &self.generation_endpoint {
            parser = parser.with_generator(Box::new(HfInferenceClient::new(
                endpoint,
                token,
                self.timeout_secs,
            )));
        }
        parser
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConstraintType;

    #[test]
    fn default_config_has_no_endpoints() {
        let config = ParserConfig::default();
        assert!(config.classification_endpoint.is_none());
        assert!(config.ner_endpoint.is_none());
        assert!(config.generation_endpoint.is_none());
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.candidate_labels.len(), 5);
    }

    #[test]
    fn rule_based_config_builds_working_parser() {
        let parser = ParserConfig::rule_based().build();
        let parsed = parser.parse_constraint("Team A cannot play on Mondays");
        assert_eq!(parsed.constraint_type, ConstraintType::Temporal);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = ParserConfig {
            classification_endpoint: Some("http://localhost:8080/classify".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ParserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.classification_endpoint.as_deref(),
            Some("http://localhost:8080/classify")
        );
    }
}
