use std::sync::LazyLock;

use regex::Regex;

use crate::models::{has_kind, ConstraintType, EntityKind, JudgeResult, ParsedConstraint};

/// Completeness above this counts as a valid extraction.
const VALIDITY_THRESHOLD: f32 = 0.4;

/// Entity count beyond which a sentence probably bundles several rules.
const COMPLEXITY_ENTITY_COUNT: usize = 6;

static HARD_PHRASING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:cannot|can't|must|never|only|prohibited|forbidden|mandatory)\b")
        .expect("invalid pattern")
});
static SOFT_PHRASING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:prefer|would like|ideally|if possible|rather|wish)\b")
        .expect("invalid pattern")
});
static PERIOD_PHRASING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:per day|per week|per month|daily|weekly|monthly|every)\b")
        .expect("invalid pattern")
});
static SINGLE_DATE_PHRASING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}\b",
    )
    .expect("invalid pattern")
});

/// Evaluate the assembled result: an independent completeness estimate
/// with weights deliberately different from the confidence scorer — a
/// second opinion, not a recomputation. The explanation field is filled
/// separately.
pub fn evaluate(text: &str, parsed: &ParsedConstraint) -> JudgeResult {
    let has = |kind| has_kind(&parsed.entities, kind);
    let team = has(EntityKind::Team);
    let time = has(EntityKind::DayOfWeek) || has(EntityKind::Time) || has(EntityKind::TimePeriod);
    let venue = has(EntityKind::Venue);
    let number = has(EntityKind::Number);

    let completeness =
        completeness_estimate(parsed.constraint_type, team, time, venue, number).clamp(0.0, 1.0);
    let is_valid = completeness > VALIDITY_THRESHOLD;

    let suggested_corrections =
        corrections(parsed.constraint_type, team, time, venue, number);
    let contextual_insights = insights(text, parsed);

    let avg_entity_confidence = if parsed.entities.is_empty() {
        0.0
    } else {
        parsed.entities.iter().map(|e| e.confidence).sum::<f32>() / parsed.entities.len() as f32
    };

    JudgeResult {
        is_valid,
        confidence: (0.6 * completeness + 0.4 * avg_entity_confidence).clamp(0.0, 1.0),
        reasoning: reasoning(parsed.constraint_type, completeness, team, time, venue, number),
        completeness_score: completeness,
        suggested_corrections,
        contextual_insights,
        explanation: None,
    }
}

fn completeness_estimate(
    constraint_type: ConstraintType,
    team: bool,
    time: bool,
    venue: bool,
    number: bool,
) -> f32 {
    let weights: [f32; 4] = match constraint_type {
        // [team, time, venue, number]
        ConstraintType::Temporal => [0.35, 0.45, 0.15, 0.05],
        ConstraintType::Capacity => [0.20, 0.15, 0.20, 0.45],
        ConstraintType::Location => [0.30, 0.10, 0.50, 0.10],
        ConstraintType::Rest => [0.25, 0.15, 0.10, 0.50],
        ConstraintType::Preference => [0.25, 0.45, 0.15, 0.15],
    };
    [team, time, venue, number]
        .iter()
        .zip(weights)
        .filter(|(present, _)| **present)
        .map(|(_, w)| w)
        .sum()
}

fn corrections(
    constraint_type: ConstraintType,
    team: bool,
    time: bool,
    venue: bool,
    number: bool,
) -> Vec<String> {
    let mut out = Vec::new();
    let type_name = constraint_type.as_str();

    if !team
        && matches!(
            constraint_type,
            ConstraintType::Temporal | ConstraintType::Preference
        )
    {
        out.push(format!(
            "no team entity found; team is critical for {type_name} constraints"
        ));
    }
    match constraint_type {
        ConstraintType::Temporal if !time => {
            out.push("no day or time evidence found; name a day of week or clock time".into());
        }
        ConstraintType::Capacity => {
            if !number {
                out.push("no numeric limit found; capacity constraints need a count".into());
            }
            if !venue && !time {
                out.push(
                    "no venue or period found; say where or how often the limit applies".into(),
                );
            }
        }
        ConstraintType::Location if !venue => {
            out.push("no venue entity found; name the field, court, or stadium".into());
        }
        ConstraintType::Rest if !number => {
            out.push("no numeric gap found; rest constraints need a day or hour count".into());
        }
        _ => {}
    }
    out
}

fn insights(text: &str, parsed: &ParsedConstraint) -> Vec<String> {
    let mut out = Vec::new();

    if HARD_PHRASING.is_match(text) {
        out.push("hard constraint phrasing".to_string());
    } else if SOFT_PHRASING.is_match(text) {
        out.push("soft preference phrasing".to_string());
    }

    if PERIOD_PHRASING.is_match(text) {
        out.push("recurring period-based constraint".to_string());
    } else if SINGLE_DATE_PHRASING.is_match(text) {
        out.push("single-date constraint".to_string());
    }

    if parsed.entities.len() > COMPLEXITY_ENTITY_COUNT {
        out.push(format!(
            "high entity count ({}); the sentence may bundle several constraints",
            parsed.entities.len()
        ));
    }
    out
}

fn reasoning(
    constraint_type: ConstraintType,
    completeness: f32,
    team: bool,
    time: bool,
    venue: bool,
    number: bool,
) -> String {
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for (present, name) in [
        (team, "team"),
        (time, "time"),
        (venue, "venue"),
        (number, "number"),
    ] {
        if present {
            found.push(name);
        } else {
            missing.push(name);
        }
    }
    format!(
        "{} constraint completeness {completeness:.2}; found: {}; missing: {}",
        constraint_type.as_str(),
        if found.is_empty() { "none".to_string() } else { found.join(", ") },
        if missing.is_empty() { "none".to_string() } else { missing.join(", ") },
    )
}
