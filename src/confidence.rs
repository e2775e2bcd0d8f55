//! Weighted confidence fusion over intent, entity, and condition evidence.
//!
//! Each sub-score is clamped to [0,1] before combination; a small
//! type-specific bonus rewards textbook phrasings; the final score is
//! clamped once more after all additions.

use crate::adapter::RankedLabel;
use crate::models::{
    has_kind, Condition, ConditionOperator, ConstraintType, Entity, EntityKind,
};

const W_INTENT: f32 = 0.40;
const W_ENTITY: f32 = 0.35;
const W_CONDITION: f32 = 0.25;

/// Classifier scores run conservative; the top score is boosted then
/// clamped.
const INTENT_BOOST: f32 = 1.2;

const ENTITY_BASE_STEP: f32 = 0.15;
const ENTITY_BASE_CAP: f32 = 0.6;
const AVG_CONFIDENCE_BONUS_CAP: f32 = 0.10;

const CONDITION_BASE: f32 = 0.5;
const STRONG_KEYWORD_STEP: f32 = 0.1;
const STRONG_KEYWORD_CAP: f32 = 0.3;

const MAX_PATTERN_BONUS: f32 = 0.15;

/// Keywords that make a condition strongly stated.
const STRONG_KEYWORDS: &[&str] = &[
    "cannot",
    "must",
    "never",
    "only",
    "at least",
    "at most",
    "no more than",
    "maximum",
    "minimum",
    "required",
];

/// Fuse all evidence into a single confidence in [0,1].
pub fn score(
    text: &str,
    labels: &[RankedLabel],
    entities: &[Entity],
    conditions: &[Condition],
    constraint_type: ConstraintType,
) -> f32 {
    let intent = intent_score(labels);
    let entity = entity_score(entities, constraint_type);
    let condition = condition_score(text, conditions, constraint_type);

    let base = W_INTENT * intent + W_ENTITY * entity + W_CONDITION * condition;
    (base + pattern_bonus(text, entities, constraint_type)).clamp(0.0, 1.0)
}

fn intent_score(labels: &[RankedLabel]) -> f32 {
    labels
        .first()
        .map(|l| (l.score * INTENT_BOOST).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

fn entity_score(entities: &[Entity], constraint_type: ConstraintType) -> f32 {
    if entities.is_empty() {
        return 0.0;
    }

    let base = (entities.len() as f32 * ENTITY_BASE_STEP).min(ENTITY_BASE_CAP);

    let critical: f32 = critical_entity_weights(constraint_type)
        .iter()
        .filter(|(kind, _)| has_kind(entities, *kind))
        .map(|(_, w)| w)
        .sum();

    let avg_confidence =
        entities.iter().map(|e| e.confidence).sum::<f32>() / entities.len() as f32;
    let confidence_bonus = avg_confidence * AVG_CONFIDENCE_BONUS_CAP;

    (base + critical + confidence_bonus).clamp(0.0, 1.0)
}

/// Which entity kinds are critical evidence for each constraint type.
fn critical_entity_weights(constraint_type: ConstraintType) -> &'static [(EntityKind, f32)] {
    match constraint_type {
        ConstraintType::Temporal => &[
            (EntityKind::DayOfWeek, 0.40),
            (EntityKind::Time, 0.40),
            (EntityKind::Team, 0.20),
        ],
        ConstraintType::Capacity => &[
            (EntityKind::CapacityIndicator, 0.30),
            (EntityKind::Number, 0.20),
            (EntityKind::Duration, 0.20),
            (EntityKind::TimePeriod, 0.10),
        ],
        ConstraintType::Location => &[
            (EntityKind::Venue, 0.40),
            (EntityKind::Team, 0.15),
        ],
        ConstraintType::Rest => &[
            (EntityKind::Number, 0.35),
            (EntityKind::TimePeriod, 0.15),
            (EntityKind::Team, 0.10),
        ],
        ConstraintType::Preference => &[
            (EntityKind::Team, 0.20),
            (EntityKind::TimePeriod, 0.15),
            (EntityKind::DayOfWeek, 0.15),
        ],
    }
}

fn condition_score(
    text: &str,
    conditions: &[Condition],
    constraint_type: ConstraintType,
) -> f32 {
    if conditions.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();

    let strong_hits = STRONG_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count() as f32;
    let keyword_bonus = (strong_hits * STRONG_KEYWORD_STEP).min(STRONG_KEYWORD_CAP);

    (CONDITION_BASE + keyword_bonus + condition_type_bonus(conditions, constraint_type))
        .clamp(0.0, 1.0)
}

/// Bonus (≤ 0.2) when the condition operator is the one this constraint
/// type is usually stated with.
fn condition_type_bonus(conditions: &[Condition], constraint_type: ConstraintType) -> f32 {
    let has_op = |op| conditions.iter().any(|c| c.operator == op);
    match constraint_type {
        ConstraintType::Capacity => {
            if has_op(ConditionOperator::LessThanOrEqual)
                || has_op(ConditionOperator::GreaterThanOrEqual)
            {
                0.2
            } else {
                0.0
            }
        }
        ConstraintType::Temporal => {
            if has_op(ConditionOperator::NotEquals) {
                0.2
            } else {
                0.1
            }
        }
        ConstraintType::Rest => {
            if has_op(ConditionOperator::GreaterThanOrEqual) {
                0.2
            } else {
                0.0
            }
        }
        ConstraintType::Location => {
            if has_op(ConditionOperator::Equals) || has_op(ConditionOperator::NotEquals) {
                0.1
            } else {
                0.0
            }
        }
        ConstraintType::Preference => 0.1,
    }
}

/// Additive bonus (≤ 0.15) for textbook evidence patterns.
fn pattern_bonus(text: &str, entities: &[Entity], constraint_type: ConstraintType) -> f32 {
    let lower = text.to_lowercase();
    let has = |kind| has_kind(entities, kind);

    match constraint_type {
        ConstraintType::Capacity => {
            if has(EntityKind::CapacityIndicator)
                && has(EntityKind::Number)
                && (has(EntityKind::Venue) || has(EntityKind::TimePeriod))
            {
                MAX_PATTERN_BONUS
            } else {
                0.0
            }
        }
        ConstraintType::Temporal => {
            let prohibition = ["cannot", "can't", "not", "never"]
                .iter()
                .any(|w| lower.contains(w));
            if has(EntityKind::Team)
                && (has(EntityKind::DayOfWeek) || has(EntityKind::Time))
                && prohibition
            {
                MAX_PATTERN_BONUS
            } else {
                0.0
            }
        }
        ConstraintType::Rest => {
            if has(EntityKind::Number) && lower.contains("between") {
                0.10
            } else {
                0.0
            }
        }
        ConstraintType::Location => {
            if has(EntityKind::Venue) && (lower.contains("home") || lower.contains("away")) {
                0.10
            } else {
                0.0
            }
        }
        ConstraintType::Preference => {
            if lower.contains("prefer") {
                0.05
            } else {
                0.0
            }
        }
    }
}
