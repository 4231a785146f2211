//! Score computation and fusion.
//!
//! The pure functions [`entity_match`], [`accuracy`] and [`confidence`] hold
//! the arithmetic. [`ScoringEngine`] gathers the raw signals from the
//! collaborators and builds a [`ScoreSet`], recording every signal it could
//! not compute as a [`MissingSignal`] instead of defaulting it.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::collaborators::{Collaborators, checked_score};
use crate::config::{AccuracyWeights, ScoringConfig};
use crate::models::{EntityMap, MissingReason, MissingSignal, ScoreSet, Signal, ValidationInput};
use crate::signals::ExtractedSignals;
use crate::text::token_overlap;
use crate::tolerance::check_alternates;

/// Keys of the actual entity map that carry the assistant's own NLU output
/// rather than entities. They never take part in entity comparison.
pub const RESERVED_ENTITY_KEYS: &[&str] = &["intent", "confidence"];

type SignalResult = std::result::Result<f64, MissingReason>;

/// Fraction of expected entities whose value the actual map matches exactly.
///
/// Keys in [`RESERVED_ENTITY_KEYS`] are skipped. Returns 1.0 when nothing is
/// left to compare.
pub fn entity_match(actual: &EntityMap, expected: &EntityMap) -> f64 {
    let compared: Vec<(&String, &Value)> = expected
        .iter()
        .filter(|(key, _)| !RESERVED_ENTITY_KEYS.contains(&key.as_str()))
        .collect();

    if compared.is_empty() {
        return 1.0;
    }

    let matched = compared
        .iter()
        .filter(|(key, value)| actual.get(*key) == Some(*value))
        .count();

    matched as f64 / compared.len() as f64
}

/// Convex combination of the three match scores.
pub fn accuracy(semantic: f64, intent: f64, entity: f64, weights: &AccuracyWeights) -> f64 {
    weights.semantic * semantic + weights.intent * intent + weights.entity * entity
}

/// Arithmetic mean of two signals.
pub fn confidence(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

struct IntentSignals {
    intent_match: SignalResult,
    confidence: SignalResult,
    predicted: Option<String>,
}

impl IntentSignals {
    fn missing(reason: MissingReason) -> Self {
        Self {
            intent_match: Err(reason.clone()),
            confidence: Err(reason),
            predicted: None,
        }
    }
}

/// Computes a [`ScoreSet`] for one input.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: Arc<ScoringConfig>,
    collaborators: Collaborators,
}

impl ScoringEngine {
    /// Create a scoring engine over validated configuration.
    pub fn new(config: Arc<ScoringConfig>, collaborators: Collaborators) -> Self {
        Self {
            config,
            collaborators,
        }
    }

    /// Gather all signals and fuse them.
    ///
    /// The three collaborator calls run concurrently. Accuracy is only
    /// computed when all three match scores exist, confidence only when both
    /// semantic similarity and intent confidence exist.
    pub async fn score(&self, input: &ValidationInput, signals: &ExtractedSignals) -> ScoreSet {
        let (semantic, intent, entity) = futures::join!(
            self.semantic_similarity(input, signals),
            self.intent(input, signals),
            self.entity(input, signals),
        );

        let mut scores = ScoreSet {
            predicted_intent: intent.predicted,
            ..Default::default()
        };

        scores.semantic_similarity =
            record(&mut scores.missing, Signal::SemanticSimilarity, semantic);
        scores.intent_match = record(&mut scores.missing, Signal::IntentMatch, intent.intent_match);
        scores.intent_confidence =
            record(&mut scores.missing, Signal::IntentConfidence, intent.confidence);
        scores.entity_match = record(&mut scores.missing, Signal::EntityMatch, entity);

        if let (Some(s), Some(i), Some(e)) =
            (scores.semantic_similarity, scores.intent_match, scores.entity_match)
        {
            scores.accuracy = Some(accuracy(s, i, e, &self.config.weights));
        }

        if let (Some(s), Some(c)) = (scores.semantic_similarity, scores.intent_confidence) {
            scores.confidence = Some(confidence(s, c));
        }

        debug!(
            semantic = ?scores.semantic_similarity,
            intent = ?scores.intent_match,
            entity = ?scores.entity_match,
            accuracy = ?scores.accuracy,
            confidence = ?scores.confidence,
            missing = scores.missing.len(),
            "Scoring complete"
        );

        scores
    }

    async fn semantic_similarity(
        &self,
        input: &ValidationInput,
        signals: &ExtractedSignals,
    ) -> SignalResult {
        let text = signals.text.as_str();
        if text.is_empty() {
            return Err(MissingReason::EmptyTranscript);
        }

        if check_alternates(text, &input.rules.alternates) {
            return Ok(1.0);
        }

        let expected = match input.expected.response.as_deref().map(str::trim) {
            Some(expected) if !expected.is_empty() => expected,
            _ => return Err(MissingReason::NoExpectedResponse),
        };

        if let Some(scorer) = &self.collaborators.similarity {
            return scorer
                .score(text, expected)
                .await
                .and_then(checked_score)
                .map_err(|e| collaborator_failed(Signal::SemanticSimilarity, e));
        }

        if self.config.lexical_fallback {
            return Ok(token_overlap(text, expected));
        }

        Err(MissingReason::NoCollaborator)
    }

    async fn intent(&self, input: &ValidationInput, signals: &ExtractedSignals) -> IntentSignals {
        let expected = input
            .expected
            .intent
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty());

        let Some(classifier) = &self.collaborators.intent else {
            return assistant_intent(input.actual_entities.as_ref(), expected);
        };

        if signals.text.is_empty() {
            return IntentSignals::missing(MissingReason::EmptyTranscript);
        }

        let candidates: Vec<String> = signals.candidate_intents.iter().cloned().collect();
        let prediction = classifier
            .classify(&signals.text, &candidates, signals.locale.as_deref())
            .await
            .and_then(|p| checked_score(p.score).map(|_| p));

        match prediction {
            Ok(prediction) => IntentSignals {
                intent_match: match_intent(expected, Some(prediction.label.as_str())),
                confidence: Ok(prediction.score),
                predicted: Some(prediction.label),
            },
            Err(e) => IntentSignals::missing(collaborator_failed(Signal::IntentMatch, e)),
        }
    }

    async fn entity(&self, input: &ValidationInput, signals: &ExtractedSignals) -> SignalResult {
        let expected = &input.expected.entities;
        if let Some(actual) = &input.actual_entities {
            return Ok(entity_match(actual, expected));
        }

        if expected
            .keys()
            .all(|key| RESERVED_ENTITY_KEYS.contains(&key.as_str()))
        {
            return Ok(1.0);
        }

        let Some(extractor) = &self.collaborators.entities else {
            return Err(MissingReason::NoEntities);
        };

        if signals.text.is_empty() {
            return Err(MissingReason::EmptyTranscript);
        }

        let extracted = extractor
            .extract(&signals.text, signals.locale.as_deref())
            .await
            .map_err(|e| collaborator_failed(Signal::EntityMatch, e))?;

        let mut actual = EntityMap::new();
        for entity in extracted {
            actual
                .entry(entity.label)
                .or_insert_with(|| Value::String(entity.text));
        }

        Ok(entity_match(&actual, expected))
    }
}

fn record(missing: &mut Vec<MissingSignal>, signal: Signal, result: SignalResult) -> Option<f64> {
    match result {
        Ok(value) => Some(value),
        Err(reason) => {
            missing.push(MissingSignal::new(signal, reason));
            None
        }
    }
}

fn collaborator_failed(signal: Signal, error: impl std::fmt::Display) -> MissingReason {
    warn!(signal = %signal, error = %error, "Collaborator call failed; signal treated as missing");
    MissingReason::CollaboratorFailed(error.to_string())
}

fn match_intent(expected: Option<&str>, predicted: Option<&str>) -> SignalResult {
    match (expected, predicted) {
        (None, _) => Err(MissingReason::NoExpectedIntent),
        (Some(_), None) => Err(MissingReason::NoCollaborator),
        (Some(expected), Some(predicted)) => {
            if predicted.trim().eq_ignore_ascii_case(expected) {
                Ok(1.0)
            } else {
                Ok(0.0)
            }
        }
    }
}

/// Intent signals from the assistant's own NLU output, carried in the
/// reserved `intent` and `confidence` entity keys.
fn assistant_intent(actual: Option<&EntityMap>, expected: Option<&str>) -> IntentSignals {
    let predicted = actual
        .and_then(|entities| entities.get("intent"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string);

    let raw_confidence = actual.and_then(|entities| entities.get("confidence"));
    let confidence = match raw_confidence.and_then(numeric) {
        Some(value) if value.is_finite() && (0.0..=1.0).contains(&value) => Ok(value),
        Some(value) => {
            warn!(confidence = value, "Reported intent confidence outside [0, 1]; ignored");
            Err(MissingReason::NoCollaborator)
        }
        None => Err(MissingReason::NoCollaborator),
    };

    IntentSignals {
        intent_match: match_intent(expected, predicted.as_deref()),
        confidence,
        predicted,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{
        CollaboratorError, EntityExtractor, ExtractedEntity, IntentClassifier, IntentPrediction,
        Result as CollaboratorResult,
    };
    use crate::models::ValidationInputBuilder;
    use crate::signals::SignalExtractor;
    use async_trait::async_trait;
    use serde_json::json;

    fn map(value: Value) -> EntityMap {
        serde_json::from_value(value).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_entity_match() {
        let expected = map(json!({"city": "NY", "temp": "75"}));
        assert_eq!(entity_match(&map(json!({"city": "NY", "temp": "75"})), &expected), 1.0);
        assert_eq!(entity_match(&map(json!({"city": "NY", "temp": "80"})), &expected), 0.5);
        assert_eq!(entity_match(&map(json!({"city": "NY"})), &EntityMap::new()), 1.0);
    }

    #[test]
    fn test_entity_match_skips_reserved_keys() {
        let expected = map(json!({"city": "NY", "intent": "get_weather", "confidence": 0.9}));
        let actual = map(json!({"city": "NY", "intent": "other", "confidence": 0.1}));
        assert_eq!(entity_match(&actual, &expected), 1.0);

        let expected = map(json!({"intent": "get_weather"}));
        assert_eq!(entity_match(&EntityMap::new(), &expected), 1.0);
    }

    #[test]
    fn test_entity_match_is_exact() {
        let expected = map(json!({"temp": "75"}));
        assert_eq!(entity_match(&map(json!({"temp": 75})), &expected), 0.0);
        assert_eq!(entity_match(&map(json!({"temp": "75 "})), &expected), 0.0);
    }

    #[test]
    fn test_accuracy_degenerate_inputs() {
        for weights in [
            AccuracyWeights::default(),
            AccuracyWeights::new(1.0, 0.0, 0.0),
            AccuracyWeights::new(0.2, 0.3, 0.5),
            AccuracyWeights::new(0.1, 0.7, 0.2),
        ] {
            assert!(approx(accuracy(1.0, 1.0, 1.0, &weights), 1.0));
            assert!(approx(accuracy(0.0, 0.0, 0.0, &weights), 0.0));
            assert!(approx(accuracy(0.5, 0.5, 0.5, &weights), 0.5));
        }
    }

    #[test]
    fn test_confidence_mean() {
        assert_eq!(confidence(1.0, 1.0), 1.0);
        assert_eq!(confidence(0.0, 0.0), 0.0);
        assert!(approx(confidence(0.8, 0.6), 0.7));
    }

    struct FixedClassifier(CollaboratorResult<IntentPrediction>);

    #[async_trait]
    impl IntentClassifier for FixedClassifier {
        async fn classify(
            &self,
            _text: &str,
            _candidate_labels: &[String],
            _locale: Option<&str>,
        ) -> CollaboratorResult<IntentPrediction> {
            self.0.clone()
        }
    }

    struct FixedExtractor(Vec<ExtractedEntity>);

    #[async_trait]
    impl EntityExtractor for FixedExtractor {
        async fn extract(
            &self,
            _text: &str,
            _locale: Option<&str>,
        ) -> CollaboratorResult<Vec<ExtractedEntity>> {
            Ok(self.0.clone())
        }
    }

    fn engine(collaborators: Collaborators) -> ScoringEngine {
        ScoringEngine::new(Arc::new(ScoringConfig::default()), collaborators)
    }

    async fn score(engine: &ScoringEngine, input: &ValidationInput) -> ScoreSet {
        engine.score(input, &SignalExtractor::extract(input)).await
    }

    #[tokio::test]
    async fn test_lexical_fallback_and_assistant_nlu() {
        let input = ValidationInputBuilder::new("it is sunny")
            .actual_entity("intent", "get_weather")
            .actual_entity("confidence", 0.6)
            .actual_entity("city", "NY")
            .expected_intent("get_weather")
            .expected_entity("city", "NY")
            .expected_response("it is sunny")
            .build();

        let scores = score(&engine(Collaborators::default()), &input).await;
        assert!(scores.is_complete());
        assert_eq!(scores.semantic_similarity, Some(1.0));
        assert_eq!(scores.intent_match, Some(1.0));
        assert_eq!(scores.entity_match, Some(1.0));
        assert_eq!(scores.predicted_intent.as_deref(), Some("get_weather"));
        assert!(approx(scores.accuracy.unwrap(), 1.0));
        assert!(approx(scores.confidence.unwrap(), 0.8));
    }

    #[tokio::test]
    async fn test_missing_signals_are_not_zero() {
        let mut config = ScoringConfig::default();
        config.lexical_fallback = false;
        let engine = ScoringEngine::new(Arc::new(config), Collaborators::default());

        let input = ValidationInputBuilder::new("it is sunny")
            .expected_response("it is sunny")
            .expected_entity("city", "NY")
            .build();
        let scores = score(&engine, &input).await;

        assert_eq!(scores.semantic_similarity, None);
        assert_eq!(scores.intent_match, None);
        assert_eq!(scores.entity_match, None);
        assert_eq!(scores.accuracy, None);
        assert_eq!(scores.confidence, None);
        assert!(scores.missing.contains(&MissingSignal::new(
            Signal::SemanticSimilarity,
            MissingReason::NoCollaborator
        )));
        assert!(scores.missing.contains(&MissingSignal::new(
            Signal::IntentMatch,
            MissingReason::NoExpectedIntent
        )));
        assert!(scores.missing.contains(&MissingSignal::new(
            Signal::EntityMatch,
            MissingReason::NoEntities
        )));
    }

    #[tokio::test]
    async fn test_empty_transcript() {
        let input = ValidationInputBuilder::new("   ")
            .expected_response("it is sunny")
            .build();
        let scores = score(&engine(Collaborators::default()), &input).await;
        assert!(scores.missing.contains(&MissingSignal::new(
            Signal::SemanticSimilarity,
            MissingReason::EmptyTranscript
        )));
    }

    #[tokio::test]
    async fn test_alternate_is_perfect_similarity() {
        let mut input = ValidationInputBuilder::new("Sunny today")
            .expected_response("It will be sunny")
            .build();
        input.rules.alternates = vec!["Sunny today".to_string()];

        let scores = score(&engine(Collaborators::default()), &input).await;
        assert_eq!(scores.semantic_similarity, Some(1.0));
    }

    #[tokio::test]
    async fn test_classifier_prediction() {
        let classifier = FixedClassifier(Ok(IntentPrediction {
            label: "Set_Timer".to_string(),
            score: 0.9,
            alternatives: Vec::new(),
        }));
        let engine = engine(Collaborators {
            intent: Some(Arc::new(classifier)),
            ..Default::default()
        });

        let input = ValidationInputBuilder::new("set a timer")
            .actual_entity("intent", "something_else")
            .expected_intent("set_timer")
            .build();
        let scores = score(&engine, &input).await;
        assert_eq!(scores.intent_match, Some(1.0));
        assert_eq!(scores.intent_confidence, Some(0.9));
        assert_eq!(scores.predicted_intent.as_deref(), Some("Set_Timer"));
    }

    #[tokio::test]
    async fn test_classifier_failure_and_bad_score() {
        let failing = FixedClassifier(Err(CollaboratorError::timeout("classifier")));
        let engine_failing = engine(Collaborators {
            intent: Some(Arc::new(failing)),
            ..Default::default()
        });
        let input = ValidationInputBuilder::new("set a timer")
            .expected_intent("set_timer")
            .build();

        let scores = score(&engine_failing, &input).await;
        assert_eq!(scores.intent_match, None);
        assert!(scores.is_missing(Signal::IntentMatch));
        assert!(scores.is_missing(Signal::IntentConfidence));
        assert!(matches!(
            scores.missing.iter().find(|m| m.signal == Signal::IntentMatch).map(|m| &m.reason),
            Some(MissingReason::CollaboratorFailed(_))
        ));

        let out_of_range = FixedClassifier(Ok(IntentPrediction {
            label: "set_timer".to_string(),
            score: 1.5,
            alternatives: Vec::new(),
        }));
        let engine_bad = engine(Collaborators {
            intent: Some(Arc::new(out_of_range)),
            ..Default::default()
        });
        let scores = score(&engine_bad, &input).await;
        assert_eq!(scores.intent_confidence, None);
        assert_eq!(scores.intent_match, None);
    }

    #[tokio::test]
    async fn test_extractor_used_without_entity_map() {
        let extractor = FixedExtractor(vec![
            ExtractedEntity::new("city", "NY", (12, 14)),
            ExtractedEntity::new("city", "Boston", (20, 26)),
            ExtractedEntity::new("temp", "80", (30, 32)),
        ]);
        let engine = engine(Collaborators {
            entities: Some(Arc::new(extractor)),
            ..Default::default()
        });

        let input = ValidationInputBuilder::new("It is 75 in NY")
            .expected_entity("city", "NY")
            .expected_entity("temp", "75")
            .build();
        let scores = score(&engine, &input).await;
        assert_eq!(scores.entity_match, Some(0.5));
    }

    #[tokio::test]
    async fn test_numeric_string_confidence() {
        let input = ValidationInputBuilder::new("hello")
            .actual_entity("intent", "greet")
            .actual_entity("confidence", "0.4")
            .build();
        let scores = score(&engine(Collaborators::default()), &input).await;
        assert_eq!(scores.intent_confidence, Some(0.4));
        assert!(scores.is_missing(Signal::IntentMatch));
        assert_eq!(scores.predicted_intent.as_deref(), Some("greet"));
    }
}
