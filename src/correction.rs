//! Schema validation and best-effort semantic correction.
//!
//! Correction is a pure `(result, issues) -> Option<corrected>` function
//! merged by the orchestrator — never an in-place mutation — so a failed
//! or garbage correction can never corrupt the already-valid base result.

use serde_json::Value;

use crate::adapter::TextGenerator;
use crate::models::ParsedConstraint;

/// Field set every emitted record must carry.
pub const EXPECTED_FIELDS: &[&str] = &[
    "constraint_id",
    "type",
    "scope",
    "entities",
    "conditions",
    "parameters",
    "priority",
    "confidence",
];

/// Check the serialized record against the expected field set plus basic
/// semantic sanity. An empty return means nothing to correct.
pub fn validate_schema(parsed: &ParsedConstraint) -> Vec<String> {
    let Ok(value) = serde_json::to_value(parsed) else {
        return vec!["record failed to serialize".to_string()];
    };

    let mut issues = Vec::new();
    for field in EXPECTED_FIELDS {
        if value.get(field).is_none() {
            issues.push(format!("missing required field: {field}"));
        }
    }
    if !(0.0..=1.0).contains(&parsed.confidence) {
        issues.push(format!("confidence {} out of range", parsed.confidence));
    }
    if parsed.entities.is_empty() {
        issues.push("entities list is empty".to_string());
    }
    if parsed.conditions.is_empty() {
        issues.push("conditions list is empty".to_string());
    }
    issues
}

/// Ask the generator for a corrected record. Returns `None` on any
/// failure — network, malformed reply, missing fields, or a reply that
/// changes the constraint's type.
pub fn correct(
    generator: &dyn TextGenerator,
    parsed: &ParsedConstraint,
    issues: &[String],
) -> Option<ParsedConstraint> {
    let current = serde_json::to_string_pretty(parsed).ok()?;
    let prompt = format!(
        "The following scheduling constraint record has validation issues.\n\
         Issues:\n- {}\n\nRecord:\n{current}\n\n\
         Return the corrected record as JSON with the same field set, \
         preserving the constraint's meaning. Return only JSON.",
        issues.join("\n- ")
    );

    let reply = generator.generate(&prompt).ok()?;
    let value = extract_json(&reply)?;
    let candidate: ParsedConstraint = serde_json::from_value(value).ok()?;

    // Meaning preservation: the correction may enrich fields, not recast
    // the constraint.
    if candidate.constraint_type != parsed.constraint_type {
        return None;
    }

    Some(ParsedConstraint {
        constraint_id: parsed.constraint_id,
        confidence: parsed.confidence,
        judgement: parsed.judgement.clone(),
        ..candidate
    })
}

/// Pull a JSON object out of a generator reply: fenced block first, then
/// the whole reply, then the outermost brace span.
fn extract_json(response: &str) -> Option<Value> {
    if let Some(start) = response.find("```json") {
        let body = &response[start + 7..];
        if let Some(end) = body.find("```") {
            if let Ok(v) = serde_json::from_str(body[..end].trim()) {
                return Some(v);
            }
        }
    }
    if let Ok(v) = serde_json::from_str(response.trim()) {
        return Some(v);
    }
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    serde_json::from_str(response.get(start..=end)?).ok()
}
