//! Slotspeak turns free-form scheduling sentences ("Team A cannot play on
//! Mondays") into typed, confidence-scored constraint records for a
//! downstream league scheduler.
//!
//! The pipeline fuses three evidence sources — an optional external
//! semantic classifier, an optional external named-entity recognizer, and
//! a deterministic pattern/keyword layer — and always produces a usable
//! answer: any external failure degrades to the rule-based path for that
//! step only.
//!
//! ```
//! use slotspeak::ConstraintParser;
//!
//! let parser = ConstraintParser::rule_based();
//! let constraint = parser.parse_constraint("Team A cannot play on Mondays");
//! assert_eq!(constraint.constraint_type.as_str(), "temporal");
//! ```

pub mod adapter;
pub mod conditions;
pub mod config;
pub mod confidence;
pub mod correction;
pub mod judge;
pub mod lexicon;
pub mod models;
pub mod orchestrator;
pub mod params;
pub mod typing;

pub use adapter::{
    AdapterError, EntityRecognizer, HfInferenceClient, IntentClassifier, RankedLabel,
    TextGenerator,
};
pub use config::ParserConfig;
pub use models::{
    Condition, ConditionOperator, ConstraintParameters, ConstraintType, Entity, EntityKind,
    JudgeResult, ParsedConstraint,
};
pub use orchestrator::ConstraintParser;
