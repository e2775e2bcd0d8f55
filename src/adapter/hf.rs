//! HTTP inference clients for the three external capabilities, plus the
//! mock implementations used by tests.

use serde_json::{json, Value};

use super::normalize::{normalize_classification, normalize_ner};
use super::types::{EntityRecognizer, IntentClassifier, RankedLabel, TextGenerator};
use super::AdapterError;
use crate::models::Entity;

/// Blocking HTTP client for one hosted-inference endpoint.
///
/// One instance per capability endpoint; the instance is `Send + Sync`
/// and shared across parse requests.
pub struct HfInferenceClient {
    endpoint: String,
    api_token: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HfInferenceClient {
    pub fn new(endpoint: &str, api_token: Option<&str>, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_token: api_token.map(str::to_string),
            client,
            timeout_secs,
        }
    }

    fn post(&self, body: &Value) -> Result<Value, AdapterError> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            if e.is_connect() {
                AdapterError::Connection(self.endpoint.clone())
            } else if e.is_timeout() {
                AdapterError::Timeout(self.timeout_secs)
            } else {
                AdapterError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AdapterError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .map_err(|e| AdapterError::MalformedResponse(e.to_string()))
    }
}

impl IntentClassifier for HfInferenceClient {
    fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<Vec<RankedLabel>, AdapterError> {
        let body = json!({
            "inputs": text,
            "parameters": { "candidate_labels": candidate_labels }
        });
        Ok(normalize_classification(&self.post(&body)?))
    }
}

impl EntityRecognizer for HfInferenceClient {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, AdapterError> {
        let body = json!({ "inputs": text });
        Ok(normalize_ner(&self.post(&body)?))
    }
}

impl TextGenerator for HfInferenceClient {
    fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        let body = json!({ "inputs": prompt });
        let value = self.post(&body)?;

        // Generation endpoints answer either [{"generated_text": ...}] or
        // a bare {"generated_text": ...}.
        let text = value
            .get(0)
            .and_then(|v| v.get("generated_text"))
            .or_else(|| value.get("generated_text"))
            .and_then(Value::as_str)
            .ok_or_else(|| AdapterError::MalformedResponse("no generated_text field".into()))?;
        Ok(text.to_string())
    }
}

/// Mock classifier for testing — returns a configured ranking or fails.
pub struct MockClassifier {
    labels: Vec<RankedLabel>,
    fail: bool,
}

impl MockClassifier {
    pub fn returning(labels: Vec<RankedLabel>) -> Self {
        Self {
            labels,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            labels: Vec::new(),
            fail: true,
        }
    }
}

impl IntentClassifier for MockClassifier {
    fn classify(
        &self,
        _text: &str,
        _candidate_labels: &[String],
    ) -> Result<Vec<RankedLabel>, AdapterError> {
        if self.fail {
            return Err(AdapterError::Connection("mock classifier".into()));
        }
        Ok(self.labels.clone())
    }
}

/// Mock entity recognizer for testing.
pub struct MockRecognizer {
    entities: Vec<Entity>,
    fail: bool,
}

impl MockRecognizer {
    pub fn returning(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            entities: Vec::new(),
            fail: true,
        }
    }
}

impl EntityRecognizer for MockRecognizer {
    fn recognize(&self, _text: &str) -> Result<Vec<Entity>, AdapterError> {
        if self.fail {
            return Err(AdapterError::Timeout(30));
        }
        Ok(self.entities.clone())
    }
}

/// Mock text generator for testing.
pub struct MockGenerator {
    response: String,
    fail: bool,
}

impl MockGenerator {
    pub fn returning(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
        }
    }
}

impl TextGenerator for MockGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, AdapterError> {
        if self.fail {
            return Err(AdapterError::Service {
                status: 503,
                body: "mock outage".into(),
            });
        }
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = HfInferenceClient::new("http://localhost:8080/", None, 30);
        assert_eq!(client.endpoint, "http://localhost:8080");
        assert_eq!(client.timeout_secs, 30);
    }

    #[test]
    fn mock_classifier_returns_configured_ranking() {
        let mock = MockClassifier::returning(vec![RankedLabel::new("capacity limitation", 0.9)]);
        let labels = mock.classify("text", &[]).unwrap();
        assert_eq!(labels[0].label, "capacity limitation");
    }

    #[test]
    fn mock_classifier_failure_is_an_error() {
        let mock = MockClassifier::failing();
        assert!(mock.classify("text", &[]).is_err());
    }

    #[test]
    fn mock_recognizer_failure_is_an_error() {
        assert!(MockRecognizer::failing().recognize("text").is_err());
    }

    #[test]
    fn mock_generator_round_trips() {
        let g = MockGenerator::returning("hello");
        assert_eq!(g.generate("prompt").unwrap(), "hello");
        assert!(MockGenerator::failing().generate("prompt").is_err());
    }
}
