//! Response-shape normalization for the external capabilities.
//!
//! All shape handling lives here so the pipeline only ever sees
//! `Vec<RankedLabel>` / `Vec<Entity>`. Two classification shapes are
//! accepted: a ranked list of `{label, score}` pairs (optionally nested
//! one array deep) and a single object carrying parallel `labels` /
//! `scores` arrays. Anything else normalizes to a single neutral label.

use serde_json::Value;

use super::types::RankedLabel;
use crate::models::{Entity, EntityKind};

/// Normalize a classification response into a non-empty descending ranking.
pub fn normalize_classification(raw: &Value) -> Vec<RankedLabel> {
    let mut labels = match raw {
        Value::Array(items) => pair_list(unnest(items)),
        Value::Object(map) => parallel_arrays(map),
        _ => Vec::new(),
    };

    if labels.is_empty() {
        return vec![RankedLabel::neutral()];
    }
    labels.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    labels
}

/// Normalize an NER response into entities. Unrecognized shapes yield an
/// empty list — the lexical library still provides coverage.
pub fn normalize_ner(raw: &Value) -> Vec<Entity> {
    let Value::Array(items) = raw else {
        return Vec::new();
    };
    unnest(items).iter().filter_map(ner_entity).collect()
}

/// Some services wrap the payload in one extra array level.
fn unnest(items: &[Value]) -> &[Value] {
    match items {
        [Value::Array(inner)] => inner,
        _ => items,
    }
}

fn pair_list(items: &[Value]) -> Vec<RankedLabel> {
    items
        .iter()
        .filter_map(|v| {
            let label = v.get("label")?.as_str()?;
            let score = v.get("score")?.as_f64()? as f32;
            Some(RankedLabel::new(label, score))
        })
        .collect()
}

fn parallel_arrays(map: &serde_json::Map<String, Value>) -> Vec<RankedLabel> {
    let (Some(labels), Some(scores)) = (
        map.get("labels").and_then(Value::as_array),
        map.get("scores").and_then(Value::as_array),
    ) else {
        return Vec::new();
    };
    labels
        .iter()
        .zip(scores)
        .filter_map(|(l, s)| Some(RankedLabel::new(l.as_str()?, s.as_f64()? as f32)))
        .collect()
}

fn ner_entity(v: &Value) -> Option<Entity> {
    let word = v
        .get("word")
        .or_else(|| v.get("text"))?
        .as_str()?
        .trim()
        .to_string();
    if word.is_empty() {
        return None;
    }
    let group = v
        .get("entity_group")
        .or_else(|| v.get("entity"))?
        .as_str()?;
    let score = v.get("score").and_then(Value::as_f64).unwrap_or(0.5) as f32;

    let kind = entity_kind_for_group(group);
    let value = if kind.is_categorical() {
        word.to_lowercase()
    } else {
        word
    };
    Some(Entity::new(kind, value, score))
}

/// Map coarse NER group tags onto the lexical vocabulary. Token-level
/// B-/I- prefixes are stripped first.
pub fn entity_kind_for_group(group: &str) -> EntityKind {
    let g = group
        .trim_start_matches("B-")
        .trim_start_matches("I-")
        .to_uppercase();
    match g.as_str() {
        "PER" | "PERSON" => EntityKind::Personnel,
        "ORG" | "ORGANIZATION" => EntityKind::Organization,
        "LOC" | "LOCATION" => EntityKind::Venue,
        "DATE" => EntityKind::Date,
        "TIME" => EntityKind::Time,
        _ => EntityKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pair_list_shape_normalized_and_sorted() {
        let raw = json!([
            {"label": "rest period requirement", "score": 0.2},
            {"label": "capacity limitation", "score": 0.9}
        ]);
        let labels = normalize_classification(&raw);
        assert_eq!(labels[0].label, "capacity limitation");
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn nested_pair_list_unwrapped() {
        let raw = json!([[{"label": "a", "score": 0.7}]]);
        let labels = normalize_classification(&raw);
        assert_eq!(labels[0].label, "a");
    }

    #[test]
    fn parallel_array_shape_normalized() {
        let raw = json!({
            "sequence": "some text",
            "labels": ["capacity limitation", "temporal scheduling restriction"],
            "scores": [0.81, 0.11]
        });
        let labels = normalize_classification(&raw);
        assert_eq!(labels[0].label, "capacity limitation");
        assert!((labels[0].score - 0.81).abs() < 1e-6);
    }

    #[test]
    fn unrecognized_shape_defaults_to_neutral() {
        for raw in [json!("garbage"), json!(42), json!({}), json!([])] {
            let labels = normalize_classification(&raw);
            assert_eq!(labels, vec![RankedLabel::neutral()], "shape {raw}");
        }
    }

    #[test]
    fn scores_clamped_during_normalization() {
        let raw = json!([{"label": "a", "score": 3.5}]);
        assert_eq!(normalize_classification(&raw)[0].score, 1.0);
    }

    #[test]
    fn ner_groups_mapped_onto_lexical_vocabulary() {
        let raw = json!([
            {"entity_group": "ORG", "word": "Riverside Rockets", "score": 0.93},
            {"entity_group": "LOC", "word": "Memorial Stadium", "score": 0.88},
            {"entity": "B-PER", "word": "the referee", "score": 0.70}
        ]);
        let entities = normalize_ner(&raw);
        assert_eq!(entities.len(), 3);
        assert_eq!(entities[0].kind, EntityKind::Organization);
        assert_eq!(entities[0].value, "Riverside Rockets");
        assert_eq!(entities[1].kind, EntityKind::Venue);
        assert_eq!(entities[2].kind, EntityKind::Personnel);
    }

    #[test]
    fn ner_garbage_yields_empty() {
        assert!(normalize_ner(&json!({"nope": true})).is_empty());
        assert!(normalize_ner(&json!([{"word": ""}])).is_empty());
    }

    #[test]
    fn unknown_group_becomes_other() {
        assert_eq!(entity_kind_for_group("MISC"), EntityKind::Other);
        assert_eq!(entity_kind_for_group("B-ORG"), EntityKind::Organization);
    }
}
