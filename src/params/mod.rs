//! Type-specific parameter parsers, one per constraint type. Each is a
//! pure function of the text (plus already-extracted entities where day
//! names matter).

pub mod capacity;
pub mod location;
pub mod preference;
pub mod rest;
pub mod temporal;

use crate::models::{ConstraintParameters, ConstraintType, Entity};

/// Run the parser selected by the resolved constraint type.
pub fn parse(
    constraint_type: ConstraintType,
    text: &str,
    entities: &[Entity],
) -> ConstraintParameters {
    match constraint_type {
        ConstraintType::Temporal => {
            ConstraintParameters::Temporal(temporal::parse(text, entities))
        }
        ConstraintType::Capacity => ConstraintParameters::Capacity(capacity::parse(text)),
        ConstraintType::Location => ConstraintParameters::Location(location::parse(text)),
        ConstraintType::Rest => ConstraintParameters::Rest(rest::parse(text)),
        ConstraintType::Preference => {
            ConstraintParameters::Preference(preference::parse(text))
        }
    }
}
