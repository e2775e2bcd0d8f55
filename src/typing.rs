//! Intent resolution: the keyword fallback classifier and the
//! intent-to-type mapper.
//!
//! Entity evidence is checked before the classifier label because a short
//! label string is the least reliable signal, and "location" labels are
//! systematically over-triggered by venue mentions that are really about
//! capacity.

use crate::adapter::RankedLabel;
use crate::models::{has_kind, ConstraintType, Entity, EntityKind};

/// Keyword groups for the rule-based fallback classifier, one per
/// category, scored by substring hit count.
struct KeywordGroup {
    label: &'static str,
    keywords: &'static [&'static str],
    /// Hit weight: preference verbs are unambiguous markers and outrank
    /// incidental day-part words.
    weight: usize,
}

const KEYWORD_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        label: "temporal scheduling restriction",
        keywords: &[
            "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "time",
            "hour", "morning", "afternoon", "evening", "night", "before", "after", "during",
            "date", "week", "month", "day",
        ],
        weight: 1,
    },
    KeywordGroup {
        label: "capacity limitation",
        keywords: &[
            "maximum", "minimum", "limit", "capacity", "more than", "less than", "no more",
            "at least", "at most", "per day", "per week", "games", "matches", "exceed",
        ],
        weight: 1,
    },
    KeywordGroup {
        label: "location or venue requirement",
        keywords: &[
            "field", "venue", "location", "home", "away", "court", "stadium", "ground",
            "facility", "site", "place",
        ],
        weight: 1,
    },
    KeywordGroup {
        label: "rest period requirement",
        keywords: &[
            "rest", "break", "between", "gap", "interval", "recovery", "days between",
            "hours between", "time between", "days rest", "rest between",
        ],
        weight: 1,
    },
    KeywordGroup {
        label: "soft scheduling preference",
        keywords: &[
            "prefer", "would prefer", "would like", "wish", "ideally", "favor", "rather",
            "if possible",
        ],
        weight: 2,
    },
];

/// Deterministic stand-in for the external classifier: keyword hit counts
/// normalized into a ranking over the same label phrases. No hits at all
/// yields the neutral ranking, which the mapper treats as no-signal.
pub fn rule_based_labels(text: &str) -> Vec<RankedLabel> {
    let lower = text.to_lowercase();

    let scores: Vec<usize> = KEYWORD_GROUPS
        .iter()
        .map(|g| g.keywords.iter().filter(|k| lower.contains(*k)).count() * g.weight)
        .collect();
    let total: usize = scores.iter().sum();
    if total == 0 {
        return vec![RankedLabel::neutral()];
    }

    let mut labels: Vec<RankedLabel> = KEYWORD_GROUPS
        .iter()
        .zip(&scores)
        .map(|(g, &s)| RankedLabel::new(g.label, s as f32 / total as f32))
        .collect();
    labels.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    labels
}

/// Capacity phrasing that reclassifies an over-triggered "location" label.
const CAPACITY_PHRASING: &[&str] = &["no more than", "per day", "maximum"];

/// Resolve the final constraint type from ranking, entities, and text.
/// First matching rule wins.
pub fn resolve_type(labels: &[RankedLabel], entities: &[Entity], text: &str) -> ConstraintType {
    let lower = text.to_lowercase();
    let has = |kind| has_kind(entities, kind);

    // 1. Entity-pattern overrides, ahead of the label.
    if has(EntityKind::Duration) && has(EntityKind::CapacityIndicator) && lower.contains("exceed")
    {
        return ConstraintType::Capacity;
    }
    if has(EntityKind::Personnel) && has(EntityKind::Requirement) {
        return ConstraintType::Preference;
    }
    if has(EntityKind::CapacityIndicator)
        && has(EntityKind::Number)
        && (has(EntityKind::TimePeriod) || has(EntityKind::Venue))
    {
        return ConstraintType::Capacity;
    }
    if (has(EntityKind::DayOfWeek) || has(EntityKind::Time))
        && !has(EntityKind::CapacityIndicator)
    {
        return ConstraintType::Temporal;
    }

    // 2. Primary label-substring rules against the top ranked label.
    if let Some(top) = labels.first() {
        let label = top.label.to_lowercase();
        if label.contains("capacity") || label.contains("limitation") {
            return ConstraintType::Capacity;
        }
        if label.contains("location") || label.contains("venue") {
            // Venue mentions in counting sentences are about capacity.
            if CAPACITY_PHRASING.iter().any(|p| lower.contains(p)) {
                return ConstraintType::Capacity;
            }
            return ConstraintType::Location;
        }
        if label.contains("temporal") || label.contains("scheduling") {
            return ConstraintType::Temporal;
        }
        if label.contains("rest") || label.contains("period") {
            return ConstraintType::Rest;
        }
        if label.contains("preference") || label.contains("soft") {
            return ConstraintType::Preference;
        }

        // 3. Secondary substrings.
        if ["field", "court", "stadium"].iter().any(|w| label.contains(w)) {
            return ConstraintType::Location;
        }
        if ["limit", "max", "min", "more", "less"]
            .iter()
            .any(|w| label.contains(w))
        {
            return ConstraintType::Capacity;
        }
    }

    // 4. Default.
    ConstraintType::Temporal
}
