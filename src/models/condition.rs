use serde::{Deserialize, Serialize};

/// Comparison/polarity relation attached to a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

impl ConditionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::LessThan => "less_than",
            Self::GreaterThan => "greater_than",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::GreaterThanOrEqual => "greater_than_or_equal",
        }
    }
}

/// A single extracted condition.
///
/// `value` is symbolic in the base pass ("specified_constraint",
/// "minimum_value", …); type-specific parameter parsers hold the concrete
/// literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: ConditionOperator,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Condition {
    pub fn symbolic(operator: ConditionOperator, value: &str) -> Self {
        Self {
            operator,
            value: value.to_string(),
            unit: None,
        }
    }
}
