use crate::adapter::TextGenerator;
use crate::models::{ConstraintParameters, ParsedConstraint};

/// Produce the human-readable explanation: generator-backed when a
/// generator is configured and answers, deterministic template otherwise.
pub fn explanation(
    generator: Option<&dyn TextGenerator>,
    text: &str,
    parsed: &ParsedConstraint,
) -> String {
    if let Some(g) = generator {
        let prompt = build_prompt(text, parsed);
        match g.generate(&prompt) {
            Ok(reply) if !reply.trim().is_empty() => return reply.trim().to_string(),
            Ok(_) => {
                tracing::warn!("empty explanation from generator; using template");
            }
            Err(e) => {
                tracing::warn!(error = %e, "explanation generation failed; using template");
            }
        }
    }
    template_explanation(parsed)
}

fn build_prompt(text: &str, parsed: &ParsedConstraint) -> String {
    format!(
        "Explain this scheduling constraint in one plain sentence for a league \
         administrator.\nSentence: {text}\nParsed type: {}\nConfidence: {:.2}",
        parsed.constraint_type.as_str(),
        parsed.confidence
    )
}

/// Deterministic fallback explanation assembled from the parsed fields.
pub fn template_explanation(parsed: &ParsedConstraint) -> String {
    let subject = parsed.scope.as_deref().unwrap_or("the schedule");
    let detail = match &parsed.parameters {
        ConstraintParameters::Temporal(p) => {
            if p.days_of_week.is_empty() {
                "a day or time restriction".to_string()
            } else {
                format!("a restriction involving {}", p.days_of_week.join(", "))
            }
        }
        ConstraintParameters::Capacity(p) => match (p.max_count, p.min_count) {
            (Some(max), _) => format!("an upper limit of {max} {}", p.resource),
            (None, Some(min)) => format!("a lower limit of {min} {}", p.resource),
            _ => format!("a limit on {}", p.resource),
        },
        ConstraintParameters::Location(p) => {
            if p.home_venue_required {
                "a home-venue requirement".to_string()
            } else if p.away_venue_required {
                "an away-venue requirement".to_string()
            } else {
                "a venue requirement".to_string()
            }
        }
        ConstraintParameters::Rest(p) => match (p.min_days, p.min_hours) {
            (Some(d), _) => format!("a minimum rest gap of {d} day(s) between games"),
            (None, Some(h)) => format!("a minimum rest gap of {h} hour(s) between games"),
            _ => "a rest requirement between games".to_string(),
        },
        ConstraintParameters::Preference(p) => {
            format!("a soft preference (weight {:.1})", p.weight)
        }
    };

    format!(
        "This is a {} constraint on {subject}: {detail}. Extracted with {} entities, {} \
         condition(s), confidence {:.2}.",
        parsed.constraint_type.as_str(),
        parsed.entities.len(),
        parsed.conditions.len(),
        parsed.confidence
    )
}
