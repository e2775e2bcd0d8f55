use serde::{Deserialize, Serialize};

/// Kind of text span recognized by the lexical library or external NER.
///
/// Closed vocabulary with an explicit catch-all so new lexical classes can
/// be added without breaking serialized records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Team,
    DayOfWeek,
    Time,
    Date,
    Venue,
    Number,
    TimePeriod,
    CapacityIndicator,
    Duration,
    Personnel,
    Requirement,
    Organization,
    Other,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::DayOfWeek => "day_of_week",
            Self::Time => "time",
            Self::Date => "date",
            Self::Venue => "venue",
            Self::Number => "number",
            Self::TimePeriod => "time_period",
            Self::CapacityIndicator => "capacity_indicator",
            Self::Duration => "duration",
            Self::Personnel => "personnel",
            Self::Requirement => "requirement",
            Self::Organization => "organization",
            Self::Other => "other",
        }
    }

    /// Categorical kinds store their value lowercased; name-like kinds
    /// (teams, venues, organizations) keep the surface casing.
    pub fn is_categorical(&self) -> bool {
        !matches!(
            self,
            Self::Team | Self::Venue | Self::Organization | Self::Personnel
        )
    }
}

/// A typed span of text with extraction confidence.
///
/// Entities from different extractors are concatenated, not merged —
/// duplicates are tolerated downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: String,
    pub confidence: f32,
}

impl Entity {
    pub fn new(kind: EntityKind, value: impl Into<String>, confidence: f32) -> Self {
        Self {
            kind,
            value: value.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Presence check used by the type mapper, scorer, and judge.
pub fn has_kind(entities: &[Entity], kind: EntityKind) -> bool {
    entities.iter().any(|e| e.kind == kind)
}
