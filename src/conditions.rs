//! Keyword-class condition extraction.
//!
//! Maps polarity/comparison phrasing to a small operator vocabulary.
//! Classes are checked in a fixed order and the first matching class wins,
//! so at most one condition is derived per input. Sentences expressing two
//! bounds ("no games before 8 AM or after 10 PM") only capture the first —
//! a known cardinality limit of the base pass, relied on downstream.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Condition, ConditionOperator};

struct ConditionClass {
    regex: Regex,
    operator: ConditionOperator,
    value: &'static str,
}

fn class(re: &str, operator: ConditionOperator, value: &'static str) -> ConditionClass {
    ConditionClass {
        regex: Regex::new(re).expect("invalid condition pattern"),
        operator,
        value,
    }
}

/// Ordered keyword classes: prohibition, obligation, before, after,
/// lower bound, upper bound.
static CONDITION_CLASSES: LazyLock<Vec<ConditionClass>> = LazyLock::new(|| {
    vec![
        class(
            r"(?i)\b(?:cannot|can't|cant|must not|may not|not allowed|never|prohibited|forbidden|banned)\b",
            ConditionOperator::NotEquals,
            "specified_constraint",
        ),
        class(
            r"(?i)\b(?:must|only|shall|has to|have to|mandatory)\b",
            ConditionOperator::Equals,
            "specified_constraint",
        ),
        class(
            r"(?i)\b(?:before|earlier than)\b",
            ConditionOperator::LessThan,
            "specified_time",
        ),
        class(
            r"(?i)\b(?:after|later than)\b",
            ConditionOperator::GreaterThan,
            "specified_time",
        ),
        class(
            r"(?i)\b(?:at least|minimum(?: of)?|no fewer than|no less than)\b",
            ConditionOperator::GreaterThanOrEqual,
            "minimum_value",
        ),
        class(
            r"(?i)\b(?:at most|maximum(?: of)?|no more than|up to)\b",
            ConditionOperator::LessThanOrEqual,
            "maximum_value",
        ),
    ]
});

/// Extract the condition expressed by the text, if any.
pub fn extract(text: &str) -> Vec<Condition> {
    for c in CONDITION_CLASSES.iter() {
        if c.regex.is_match(text) {
            return vec![Condition::symbolic(c.operator, c.value)];
        }
    }
    Vec::new()
}
