//! Static pattern tables and the regex-driven entity extractor.
//!
//! This is the mandatory fallback entity source when external NER is
//! unavailable — its output is structurally identical either way, and it
//! always runs (NER results are unioned in, never substituted).

mod patterns;

use crate::models::{Entity, EntityKind};
use patterns::LexicalPattern;

/// Confidence for a number found next to a capacity/quantifier phrase.
const NUMBER_NEAR_CAPACITY_CONFIDENCE: f32 = 0.90;

/// Max gap in bytes between a number span and a capacity span to count as
/// adjacent.
const ADJACENCY_WINDOW: usize = 16;

/// Run every pattern class over the text, in a fixed order.
///
/// Pure and total: never fails, never blocks. Duplicate spans across
/// classes are kept. Spans already tagged day-of-week are excluded from
/// team matching so "Mondays" never doubles as a team name.
pub fn extract(text: &str) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut day_spans: Vec<(usize, usize)> = Vec::new();
    let mut capacity_spans: Vec<(usize, usize)> = Vec::new();

    // Days first: their spans gate team matching below.
    for caps in patterns::DAY_OF_WEEK.regex.captures_iter(text) {
        let full = caps.get(0).expect("match has span");
        let day = caps.get(1).expect("day capture").as_str().to_lowercase();
        day_spans.push((full.start(), full.end()));
        entities.push(Entity::new(
            EntityKind::DayOfWeek,
            day,
            patterns::DAY_OF_WEEK.confidence,
        ));
    }

    push_all(&patterns::CLOCK_TIME, text, &mut entities);
    push_all(&patterns::DURATION, text, &mut entities);

    for m in patterns::CAPACITY_INDICATOR.regex.find_iter(text) {
        capacity_spans.push((m.start(), m.end()));
        entities.push(Entity::new(
            EntityKind::CapacityIndicator,
            m.as_str().to_lowercase(),
            patterns::CAPACITY_INDICATOR.confidence,
        ));
    }

    push_all(&patterns::TIME_PERIOD, text, &mut entities);
    push_all(&patterns::VENUE, text, &mut entities);
    push_all(&patterns::PERSONNEL, text, &mut entities);
    push_all(&patterns::REQUIREMENT, text, &mut entities);
    push_all(&patterns::ORGANIZATION, text, &mut entities);

    for m in patterns::NUMBER.regex.find_iter(text) {
        let confidence = if near_any(&capacity_spans, m.start(), m.end()) {
            NUMBER_NEAR_CAPACITY_CONFIDENCE
        } else {
            patterns::NUMBER.confidence
        };
        entities.push(Entity::new(EntityKind::Number, m.as_str(), confidence));
    }

    // Team shapes last: day spans are known by now.
    for m in patterns::TEAM_LABELED.regex.find_iter(text) {
        if !overlaps_any(&day_spans, m.start(), m.end()) {
            entities.push(Entity::new(
                EntityKind::Team,
                m.as_str(),
                patterns::TEAM_LABELED.confidence,
            ));
        }
    }
    for m in patterns::TEAM_MASCOT.regex.find_iter(text) {
        if overlaps_any(&day_spans, m.start(), m.end()) {
            continue;
        }
        let bare = m.as_str().trim_start_matches("The ").trim();
        if patterns::MASCOT_STOPWORDS.contains(&bare) {
            continue;
        }
        entities.push(Entity::new(
            EntityKind::Team,
            m.as_str(),
            patterns::TEAM_MASCOT.confidence,
        ));
    }

    entities
}

fn push_all(pat: &LexicalPattern, text: &str, entities: &mut Vec<Entity>) {
    for m in pat.regex.find_iter(text) {
        let value = if pat.kind.is_categorical() {
            m.as_str().to_lowercase()
        } else {
            m.as_str().to_string()
        };
        entities.push(Entity::new(pat.kind, value, pat.confidence));
    }
}

fn overlaps_any(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|&(s, e)| start < e && s < end)
}

fn near_any(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|&(s, e)| {
        if start >= e {
            start - e <= ADJACENCY_WINDOW
        } else if s >= end {
            s - end <= ADJACENCY_WINDOW
        } else {
            true
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of(entities: &[Entity], kind: EntityKind) -> Vec<&str> {
        entities
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.value.as_str())
            .collect()
    }

    #[test]
    fn empty_text_yields_no_entities() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn plural_day_normalized_to_singular_lowercase() {
        let entities = extract("Team A cannot play on Mondays");
        assert_eq!(kinds_of(&entities, EntityKind::DayOfWeek), vec!["monday"]);
    }

    #[test]
    fn day_span_never_doubles_as_team() {
        let entities = extract("No games on Mondays or Tuesdays");
        let teams = kinds_of(&entities, EntityKind::Team);
        assert!(
            teams.iter().all(|t| !t.to_lowercase().contains("monday")
                && !t.to_lowercase().contains("tuesday")),
            "days leaked into teams: {teams:?}"
        );
    }

    #[test]
    fn labeled_team_shape_extracted_verbatim() {
        let entities = extract("Team A cannot play on Mondays");
        assert_eq!(kinds_of(&entities, EntityKind::Team), vec!["Team A"]);
    }

    #[test]
    fn mascot_team_extracted_but_stopwords_skipped() {
        let entities = extract("The Eagles host two Games this week");
        let teams = kinds_of(&entities, EntityKind::Team);
        assert_eq!(teams, vec!["The Eagles"]);
    }

    #[test]
    fn number_near_capacity_phrase_is_boosted() {
        let entities = extract("No more than 3 games per day");
        let number = entities
            .iter()
            .find(|e| e.kind == EntityKind::Number)
            .unwrap();
        assert_eq!(number.value, "3");
        assert_eq!(number.confidence, NUMBER_NEAR_CAPACITY_CONFIDENCE);
    }

    #[test]
    fn bare_number_keeps_base_confidence() {
        let entities = extract("Field 7 is closed");
        let number = entities
            .iter()
            .find(|e| e.kind == EntityKind::Number)
            .unwrap();
        assert_eq!(number.confidence, 0.85);
    }

    #[test]
    fn capacity_sentence_has_full_evidence() {
        let entities = extract("No more than 3 games per day on Field 1");
        assert!(!kinds_of(&entities, EntityKind::CapacityIndicator).is_empty());
        assert!(kinds_of(&entities, EntityKind::Number).contains(&"3"));
        assert!(kinds_of(&entities, EntityKind::Venue).contains(&"Field 1"));
        assert!(kinds_of(&entities, EntityKind::TimePeriod).contains(&"per day"));
    }

    #[test]
    fn personnel_and_requirement_phrases_detected() {
        let entities = extract("All games require adult supervision");
        assert!(!kinds_of(&entities, EntityKind::Requirement).is_empty());
        assert!(kinds_of(&entities, EntityKind::Personnel).contains(&"adult supervision"));
    }

    #[test]
    fn organization_level_phrases_detected() {
        let entities = extract("high school teams play varsity on Fridays");
        let orgs = kinds_of(&entities, EntityKind::Organization);
        assert!(orgs.contains(&"high school"));
        assert!(orgs.contains(&"varsity"));
    }

    #[test]
    fn duration_and_time_both_extracted() {
        let entities = extract("games last 90 minutes and start at 6:30 PM");
        assert_eq!(kinds_of(&entities, EntityKind::Duration), vec!["90 minutes"]);
        assert!(kinds_of(&entities, EntityKind::Time)
            .iter()
            .any(|t| t.contains("6:30")));
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "Team A cannot play on Mondays before 8 AM at Field 2";
        assert_eq!(extract(text), extract(text));
    }
}
