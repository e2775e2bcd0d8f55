use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::condition::Condition;
use super::entity::{Entity, EntityKind};
use super::judge::JudgeResult;

/// The five constraint categories a sentence can resolve to.
///
/// Absence of signal defaults to `Temporal` — the result type is never
/// missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    #[default]
    Temporal,
    Capacity,
    Location,
    Rest,
    Preference,
}

impl ConstraintType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temporal => "temporal",
            Self::Capacity => "capacity",
            Self::Location => "location",
            Self::Rest => "rest",
            Self::Preference => "preference",
        }
    }

    /// Scheduler priority: hard constraint types rank 1, soft preferences 3.
    pub fn default_priority(&self) -> u8 {
        match self {
            Self::Preference => 3,
            _ => 1,
        }
    }
}

/// A concrete start/end clock-time pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Day/time restrictions for `temporal` constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TemporalParams {
    /// Ordered, deduplicated lowercase day names ("monday", …).
    pub days_of_week: Vec<String>,
    /// Best-effort month-name + day-number matches; approximate, not
    /// authoritative.
    pub excluded_dates: Vec<NaiveDate>,
    pub time_ranges: Vec<TimeRange>,
    pub before_time: Option<String>,
    pub after_time: Option<String>,
}

/// Count limits for `capacity` constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityParams {
    pub max_count: Option<u32>,
    pub min_count: Option<u32>,
    /// "day", "week" or "month" when a recurring period is phrased.
    pub per_period: Option<String>,
    pub resource: String,
}

impl Default for CapacityParams {
    fn default() -> Self {
        Self {
            max_count: None,
            min_count: None,
            per_period: None,
            resource: "games".to_string(),
        }
    }
}

/// Venue requirements for `location` constraints. Venue names themselves
/// stay in the entity list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LocationParams {
    pub home_venue_required: bool,
    pub away_venue_required: bool,
}

/// Minimum recovery gaps for `rest` constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestParams {
    pub min_days: Option<u32>,
    pub min_hours: Option<u32>,
    pub between_games: bool,
}

impl Default for RestParams {
    fn default() -> Self {
        Self {
            min_days: None,
            min_hours: None,
            between_games: true,
        }
    }
}

/// Soft-constraint payload for `preference` constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceParams {
    /// The full original sentence — preferences are kept verbatim for the
    /// scheduler's objective function.
    pub description: String,
    pub weight: f32,
}

impl Default for PreferenceParams {
    fn default() -> Self {
        Self {
            description: String::new(),
            weight: 0.5,
        }
    }
}

/// Exactly one parameter block is populated, selected by the resolved
/// constraint type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintParameters {
    Temporal(TemporalParams),
    Capacity(CapacityParams),
    Location(LocationParams),
    Rest(RestParams),
    Preference(PreferenceParams),
}

impl ConstraintParameters {
    /// The constraint type this block belongs to.
    pub fn constraint_type(&self) -> ConstraintType {
        match self {
            Self::Temporal(_) => ConstraintType::Temporal,
            Self::Capacity(_) => ConstraintType::Capacity,
            Self::Location(_) => ConstraintType::Location,
            Self::Rest(_) => ConstraintType::Rest,
            Self::Preference(_) => ConstraintType::Preference,
        }
    }
}

/// Root result of a parse: typed constraint, evidence, and confidence.
///
/// Constructed fresh per input sentence; immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedConstraint {
    pub constraint_id: Uuid,
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,
    /// First team the constraint applies to, when one was found.
    pub scope: Option<String>,
    pub entities: Vec<Entity>,
    pub conditions: Vec<Condition>,
    pub parameters: ConstraintParameters,
    pub priority: u8,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgement: Option<JudgeResult>,
}

impl ParsedConstraint {
    /// Minimal result for empty or whitespace-only input: temporal default,
    /// zero confidence, no evidence.
    pub fn empty() -> Self {
        Self {
            constraint_id: Uuid::new_v4(),
            constraint_type: ConstraintType::Temporal,
            scope: None,
            entities: Vec::new(),
            conditions: Vec::new(),
            parameters: ConstraintParameters::Temporal(TemporalParams::default()),
            priority: ConstraintType::Temporal.default_priority(),
            confidence: 0.0,
            judgement: None,
        }
    }

    /// First team entity value, used to populate `scope`.
    pub fn first_team(entities: &[Entity]) -> Option<String> {
        entities
            .iter()
            .find(|e| e.kind == EntityKind::Team)
            .map(|e| e.value.clone())
    }
}
