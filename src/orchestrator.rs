//! Stage sequencing and fallback control.
//!
//! `parse_constraint` is the sole entry point: it fans out the two
//! independent external calls, joins, then runs the linear local stages.
//! Whenever an external capability is unconfigured or fails, the
//! rule-based equivalent substitutes for that step only — partial
//! degradation keeps whichever signal is still trustworthy.

use uuid::Uuid;

use crate::adapter::{
    AdapterError, EntityRecognizer, IntentClassifier, RankedLabel, TextGenerator,
    DEFAULT_CANDIDATE_LABELS,
};
use crate::models::{Entity, ParsedConstraint};
use crate::{conditions, confidence, correction, judge, lexicon, params, typing};

/// Constraint parser with optionally attached external capabilities.
///
/// Stateless across requests apart from the shared capability handles;
/// safe to call concurrently.
pub struct ConstraintParser {
    classifier: Option<Box<dyn IntentClassifier>>,
    recognizer: Option<Box<dyn EntityRecognizer>>,
    generator: Option<Box<dyn TextGenerator>>,
    candidate_labels: Vec<String>,
}

impl Default for ConstraintParser {
    fn default() -> Self {
        Self::rule_based()
    }
}

impl ConstraintParser {
    /// Fully local parser: no external calls, ever.
    pub fn rule_based() -> Self {
        Self {
            classifier: None,
            recognizer: None,
            generator: None,
            candidate_labels: DEFAULT_CANDIDATE_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn IntentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn with_generator(mut self, generator: Box<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_candidate_labels(mut self, labels: Vec<String>) -> Self {
        if !labels.is_empty() {
            self.candidate_labels = labels;
        }
        self
    }

    /// Parse one sentence into a typed, confidence-scored constraint.
    ///
    /// Total for any finite input: adapter failures degrade to the
    /// rule-based path and are never surfaced to the caller.
    pub fn parse_constraint(&self, text: &str) -> ParsedConstraint {
        let _span = tracing::info_span!("parse_constraint", chars = text.len()).entered();

        if text.trim().is_empty() {
            tracing::debug!("empty input; returning minimal result");
            return ParsedConstraint::empty();
        }

        let (labels, ner_entities) = self.classify_and_recognize(text);

        // Lexical extraction always runs; NER is unioned in.
        let mut entities = lexicon::extract(text);
        entities.extend(ner_entities);

        let conds = conditions::extract(text);
        let constraint_type = typing::resolve_type(&labels, &entities, text);
        let parameters = params::parse(constraint_type, text, &entities);
        let score = confidence::score(text, &labels, &entities, &conds, constraint_type);

        tracing::debug!(
            constraint_type = constraint_type.as_str(),
            entities = entities.len(),
            conditions = conds.len(),
            confidence = score,
            "primary result assembled"
        );

        let mut parsed = ParsedConstraint {
            constraint_id: Uuid::new_v4(),
            constraint_type,
            scope: ParsedConstraint::first_team(&entities),
            entities,
            conditions: conds,
            parameters,
            priority: constraint_type.default_priority(),
            confidence: score,
            judgement: None,
        };

        let mut verdict = judge::evaluate(text, &parsed);
        verdict.explanation = Some(judge::explanation(
            self.generator.as_deref(),
            text,
            &parsed,
        ));
        parsed.confidence = judge::apply_verdict(parsed.confidence, &verdict);
        parsed.judgement = Some(verdict);

        if let Some(generator) = self.generator.as_deref() {
            let issues = correction::validate_schema(&parsed);
            if !issues.is_empty() {
                match correction::correct(generator, &parsed, &issues) {
                    Some(fixed) => {
                        tracing::debug!(issues = issues.len(), "schema correction merged");
                        parsed = fixed;
                    }
                    None => {
                        tracing::debug!("schema correction unavailable; keeping base result");
                    }
                }
            }
        }

        parsed
    }

    /// Fan out classification and NER concurrently; each call degrades
    /// independently on failure.
    fn classify_and_recognize(&self, text: &str) -> (Vec<RankedLabel>, Vec<Entity>) {
        match (self.classifier.as_deref(), self.recognizer.as_deref()) {
            (None, None) => (typing::rule_based_labels(text), Vec::new()),
            (Some(classifier), None) => (
                self.labels_or_fallback(classifier.classify(text, &self.candidate_labels), text),
                Vec::new(),
            ),
            (None, Some(recognizer)) => (
                typing::rule_based_labels(text),
                entities_or_empty(recognizer.recognize(text)),
            ),
            (Some(classifier), Some(recognizer)) => std::thread::scope(|scope| {
                let classification =
                    scope.spawn(|| classifier.classify(text, &self.candidate_labels));
                let recognition = scope.spawn(|| recognizer.recognize(text));

                let labels = self.labels_or_fallback(
                    classification
                        .join()
                        .unwrap_or_else(|_| Err(panicked("classification"))),
                    text,
                );
                let entities = entities_or_empty(
                    recognition
                        .join()
                        .unwrap_or_else(|_| Err(panicked("entity recognition"))),
                );
                (labels, entities)
            }),
        }
    }

    fn labels_or_fallback(
        &self,
        outcome: Result<Vec<RankedLabel>, AdapterError>,
        text: &str,
    ) -> Vec<RankedLabel> {
        match outcome {
            Ok(labels) if !labels.is_empty() => labels,
            Ok(_) => {
                tracing::warn!("classifier returned empty ranking; using rule-based labels");
                typing::rule_based_labels(text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "intent classification failed; using rule-based labels");
                typing::rule_based_labels(text)
            }
        }
    }
}

fn entities_or_empty(outcome: Result<Vec<Entity>, AdapterError>) -> Vec<Entity> {
    match outcome {
        Ok(entities) => entities,
        Err(e) => {
            tracing::warn!(error = %e, "entity recognition failed; lexical extraction only");
            Vec::new()
        }
    }
}

fn panicked(stage: &str) -> AdapterError {
    AdapterError::Http(format!("{stage} task panicked"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{MockClassifier, MockGenerator, MockRecognizer};
    use crate::models::{
        ConditionOperator, ConstraintParameters, ConstraintType, EntityKind,
    };

    fn entity_values(parsed: &ParsedConstraint, kind: EntityKind) -> Vec<&str> {
        parsed
            .entities
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.value.as_str())
            .collect()
    }

    // ── Rule-based scenarios ────────────────────────────────────────

    #[test]
    fn scenario_team_prohibited_on_mondays() {
        let parser = ConstraintParser::rule_based();
        let parsed = parser.parse_constraint("Team A cannot play on Mondays");

        assert_eq!(parsed.constraint_type, ConstraintType::Temporal);
        assert_eq!(entity_values(&parsed, EntityKind::Team), vec!["Team A"]);
        assert_eq!(entity_values(&parsed, EntityKind::DayOfWeek), vec!["monday"]);
        assert_eq!(parsed.conditions.len(), 1);
        assert_eq!(parsed.conditions[0].operator, ConditionOperator::NotEquals);
        assert_eq!(parsed.scope.as_deref(), Some("Team A"));

        let ConstraintParameters::Temporal(p) = &parsed.parameters else {
            panic!("expected temporal parameters");
        };
        assert_eq!(p.days_of_week, vec!["monday"]);
    }

    #[test]
    fn scenario_capacity_per_day_on_field() {
        let parser = ConstraintParser::rule_based();
        let parsed = parser.parse_constraint("No more than 3 games per day on Field 1");

        assert_eq!(parsed.constraint_type, ConstraintType::Capacity);
        assert!(!entity_values(&parsed, EntityKind::CapacityIndicator).is_empty());
        assert!(entity_values(&parsed, EntityKind::Number).contains(&"3"));
        assert!(entity_values(&parsed, EntityKind::Venue).contains(&"Field 1"));

        let ConstraintParameters::Capacity(p) = &parsed.parameters else {
            panic!("expected capacity parameters");
        };
        assert_eq!(p.max_count, Some(3));
        assert_eq!(p.per_period.as_deref(), Some("day"));
    }

    #[test]
    fn scenario_rest_days_between_games() {
        let parser = ConstraintParser::rule_based();
        let parsed = parser.parse_constraint("Teams need at least 2 days rest between games");

        assert_eq!(parsed.constraint_type, ConstraintType::Rest);
        let ConstraintParameters::Rest(p) = &parsed.parameters else {
            panic!("expected rest parameters");
        };
        assert_eq!(p.min_days, Some(2));
        assert!(p.between_games);
    }

    #[test]
    fn scenario_empty_input_short_circuits() {
        let parser = ConstraintParser::rule_based();
        for text in ["", "   ", "\n\t"] {
            let parsed = parser.parse_constraint(text);
            assert_eq!(parsed.confidence, 0.0);
            assert!(parsed.entities.is_empty());
            assert!(parsed.conditions.is_empty());
            assert_eq!(parsed.constraint_type, ConstraintType::Temporal);
        }
    }

    #[test]
    fn preference_sentence_resolves_soft() {
        let parser = ConstraintParser::rule_based();
        let parsed = parser.parse_constraint("We would prefer morning games");

        assert_eq!(parsed.constraint_type, ConstraintType::Preference);
        assert_eq!(parsed.priority, 3);
        let ConstraintParameters::Preference(p) = &parsed.parameters else {
            panic!("expected preference parameters");
        };
        assert_eq!(p.description, "We would prefer morning games");
        assert_eq!(p.weight, 0.5);
    }

    // ── Invariants ──────────────────────────────────────────────────

    #[test]
    fn confidence_always_in_unit_interval() {
        let parser = ConstraintParser::rule_based();
        for text in [
            "",
            "hello",
            "Team A cannot play on Mondays",
            "No more than 3 games per day on Field 1",
            "must cannot maximum minimum at least at most never only",
        ] {
            let parsed = parser.parse_constraint(text);
            assert!((0.0..=1.0).contains(&parsed.confidence), "{text:?}");
            for e in &parsed.entities {
                assert!((0.0..=1.0).contains(&e.confidence));
            }
        }
    }

    #[test]
    fn day_never_doubles_as_team() {
        let parser = ConstraintParser::rule_based();
        let parsed = parser.parse_constraint("Mondays are busy");
        let teams = entity_values(&parsed, EntityKind::Team);
        assert!(teams.is_empty(), "teams: {teams:?}");
        assert_eq!(entity_values(&parsed, EntityKind::DayOfWeek), vec!["monday"]);
    }

    #[test]
    fn rule_based_path_is_deterministic() {
        let parser = ConstraintParser::rule_based();
        let text = "Team A cannot play on Mondays before 8 AM";
        let a = parser.parse_constraint(text);
        let b = parser.parse_constraint(text);
        assert_eq!(a.entities, b.entities);
        assert_eq!(a.conditions, b.conditions);
        assert_eq!(a.parameters, b.parameters);
        assert_eq!(a.confidence, b.confidence);
    }

    #[test]
    fn no_signal_input_defaults_to_low_confidence_temporal() {
        let parser = ConstraintParser::rule_based();
        let parsed = parser.parse_constraint("the quick brown fox");
        assert_eq!(parsed.constraint_type, ConstraintType::Temporal);
        assert!(parsed.confidence < 0.5);
        assert!(parsed.judgement.is_some());
    }

    #[test]
    fn judgement_always_attached_for_nonempty_input() {
        let parser = ConstraintParser::rule_based();
        let parsed = parser.parse_constraint("Team A cannot play on Mondays");
        let verdict = parsed.judgement.as_ref().unwrap();
        assert!(verdict.is_valid);
        assert!(verdict.explanation.is_some());
    }

    // ── Degradation ─────────────────────────────────────────────────

    /// Make degradation warnings visible under RUST_LOG when debugging.
    fn init_logs() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    #[test]
    fn both_adapters_failing_degrades_to_rule_based() {
        init_logs();
        let external = ConstraintParser::rule_based()
            .with_classifier(Box::new(MockClassifier::failing()))
            .with_recognizer(Box::new(MockRecognizer::failing()));
        let local = ConstraintParser::rule_based();

        let text = "Team A cannot play on Mondays";
        let degraded = external.parse_constraint(text);
        let baseline = local.parse_constraint(text);

        assert_eq!(degraded.constraint_type, baseline.constraint_type);
        assert_eq!(degraded.entities, baseline.entities);
        assert_eq!(degraded.conditions, baseline.conditions);
        assert_eq!(degraded.parameters, baseline.parameters);
    }

    #[test]
    fn failing_classifier_keeps_working_recognizer() {
        let extra = Entity::new(EntityKind::Organization, "Riverside League", 0.9);
        let parser = ConstraintParser::rule_based()
            .with_classifier(Box::new(MockClassifier::failing()))
            .with_recognizer(Box::new(MockRecognizer::returning(vec![extra.clone()])));

        let parsed = parser.parse_constraint("Team A cannot play on Mondays");
        assert!(parsed.entities.contains(&extra), "NER entity not unioned");
        // The failing classifier fell back to rule-based labels.
        assert_eq!(parsed.constraint_type, ConstraintType::Temporal);
    }

    #[test]
    fn failing_recognizer_keeps_working_classifier() {
        let parser = ConstraintParser::rule_based()
            .with_classifier(Box::new(MockClassifier::returning(vec![RankedLabel::new(
                "rest period requirement",
                0.92,
            )])))
            .with_recognizer(Box::new(MockRecognizer::failing()));

        let parsed = parser.parse_constraint("keep gaps generous");
        assert_eq!(parsed.constraint_type, ConstraintType::Rest);
    }

    #[test]
    fn ner_output_unions_with_lexical_output() {
        let extra = Entity::new(EntityKind::Venue, "Memorial Stadium", 0.88);
        let parser = ConstraintParser::rule_based()
            .with_recognizer(Box::new(MockRecognizer::returning(vec![extra.clone()])));

        let parsed = parser.parse_constraint("Team A cannot play on Mondays");
        // Lexical entities still present alongside the NER result.
        assert!(entity_values(&parsed, EntityKind::DayOfWeek).contains(&"monday"));
        assert!(parsed.entities.contains(&extra));
    }

    #[test]
    fn empty_classifier_ranking_falls_back() {
        let parser = ConstraintParser::rule_based()
            .with_classifier(Box::new(MockClassifier::returning(vec![])));
        let parsed = parser.parse_constraint("Team A cannot play on Mondays");
        assert_eq!(parsed.constraint_type, ConstraintType::Temporal);
    }

    // ── Generator-backed stages ─────────────────────────────────────

    #[test]
    fn generator_failure_never_breaks_the_parse() {
        let parser = ConstraintParser::rule_based()
            .with_generator(Box::new(MockGenerator::failing()));
        let parsed = parser.parse_constraint("Team A cannot play on Mondays");

        // Explanation degraded to the template; correction no-opped.
        let verdict = parsed.judgement.as_ref().unwrap();
        assert!(verdict
            .explanation
            .as_ref()
            .unwrap()
            .contains("temporal constraint"));
        assert_eq!(parsed.constraint_type, ConstraintType::Temporal);
    }

    #[test]
    fn garbage_correction_keeps_base_result() {
        let parser = ConstraintParser::rule_based()
            .with_generator(Box::new(MockGenerator::returning("not json at all")));
        let baseline = ConstraintParser::rule_based().parse_constraint("hello world");
        let parsed = parser.parse_constraint("hello world");

        assert_eq!(parsed.constraint_type, baseline.constraint_type);
        assert_eq!(parsed.entities, baseline.entities);
    }
}
