//! The validation engine: composes signal extraction, scoring, tolerance
//! checks, reference resolution and the decision policy.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::collaborators::{Collaborators, EntityExtractor, IntentClassifier, SimilarityScorer};
use crate::config::{VoxcheckConfig, validation};
use crate::decision::DecisionPolicy;
use crate::models::{Decision, ValidationInput};
use crate::reference::ReferenceResolver;
use crate::scoring::ScoringEngine;
use crate::signals::SignalExtractor;
use crate::tolerance::ToleranceEngine;
use crate::{Result, VoxcheckError};

/// Evaluates validation inputs into decisions.
///
/// The engine holds only immutable configuration and collaborator handles,
/// so it can be cloned cheaply and shared across tasks.
///
/// # Example
///
/// ```no_run
/// use voxcheck::prelude::*;
///
/// # async fn run() -> voxcheck::Result<()> {
/// let engine = ValidationEngine::new(VoxcheckConfig::default())?;
/// let input = ValidationInputBuilder::new("It is sunny in New York")
///     .expected_response("It is sunny in New York")
///     .build();
/// let decision = engine.evaluate(&input).await;
/// println!("{}: {}", decision.review_status, decision.rationale);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    config: Arc<VoxcheckConfig>,
    scoring: ScoringEngine,
    tolerance: ToleranceEngine,
    reference: ReferenceResolver,
    policy: DecisionPolicy,
}

impl ValidationEngine {
    /// Create an engine without collaborators.
    pub fn new(config: VoxcheckConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Start building an engine with collaborators.
    pub fn builder(config: VoxcheckConfig) -> ValidationEngineBuilder {
        ValidationEngineBuilder::new(config)
    }

    /// The configuration in use.
    pub fn config(&self) -> &VoxcheckConfig {
        &self.config
    }

    /// Evaluate one input.
    ///
    /// Never fails: gaps in the input and collaborator failures become
    /// missing signals, which route the result to human review. Evaluating
    /// the same input against the same collaborator outputs always yields
    /// the same decision.
    #[instrument(skip_all)]
    pub async fn evaluate(&self, input: &ValidationInput) -> Decision {
        let signals = SignalExtractor::extract(input);

        let tolerance = self.tolerance.apply_tolerance_checks(
            &signals.text,
            &input.rules,
            input.expected.response.as_deref(),
        );

        let reference_text = input
            .utterance
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(&signals.text);
        let reference = self.reference.resolve_against(
            reference_text,
            &input.context,
            input.expected.reference.as_ref(),
        );

        let scores = self.scoring.score(input, &signals).await;
        let decision = self.policy.decide(scores, tolerance, reference);

        info!(
            review_status = %decision.review_status,
            confidence = ?decision.scores.confidence,
            rationale = %decision.rationale,
            "Validation decided"
        );

        decision
    }
}

/// Builder for [`ValidationEngine`].
#[derive(Debug)]
pub struct ValidationEngineBuilder {
    config: VoxcheckConfig,
    collaborators: Collaborators,
}

impl ValidationEngineBuilder {
    /// Start from a configuration.
    pub fn new(config: VoxcheckConfig) -> Self {
        Self {
            config,
            collaborators: Collaborators::default(),
        }
    }

    /// Use a semantic similarity scorer.
    pub fn with_similarity_scorer(mut self, scorer: Arc<dyn SimilarityScorer>) -> Self {
        self.collaborators.similarity = Some(scorer);
        self
    }

    /// Use an intent classifier.
    pub fn with_intent_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.collaborators.intent = Some(classifier);
        self
    }

    /// Use an entity extractor.
    pub fn with_entity_extractor(mut self, extractor: Arc<dyn EntityExtractor>) -> Self {
        self.collaborators.entities = Some(extractor);
        self
    }

    /// Validate the configuration and build the engine.
    pub fn build(self) -> Result<ValidationEngine> {
        validation::validate_config(&self.config)
            .map_err(|e| VoxcheckError::Configuration(e.to_string()))?;

        tracing::debug!(collaborators = ?self.collaborators, "Building validation engine");

        let config = Arc::new(self.config);
        Ok(ValidationEngine {
            scoring: ScoringEngine::new(Arc::new(config.scoring.clone()), self.collaborators),
            tolerance: ToleranceEngine::new(Arc::new(config.tolerance.clone())),
            reference: ReferenceResolver::new(&config.reference),
            policy: DecisionPolicy::new(Arc::new(config.decision.clone())),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccuracyWeights;
    use crate::models::{ReviewStatus, ValidationInputBuilder};
    use serde_json::json;

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let mut config = VoxcheckConfig::default();
        config.scoring.weights = AccuracyWeights::new(0.5, 0.5, 0.5);
        let err = ValidationEngine::new(config).unwrap_err();
        assert!(matches!(err, VoxcheckError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_evaluate_with_assistant_nlu() {
        let engine = ValidationEngine::new(VoxcheckConfig::default()).unwrap();
        let input = ValidationInputBuilder::new("It is 75 degrees in NY")
            .actual_entity("city", "NY")
            .actual_entity("intent", "get_weather")
            .actual_entity("confidence", 0.9)
            .expected_intent("get_weather")
            .expected_entity("city", "NY")
            .expected_response("It is 75 degrees in NY")
            .build();

        let decision = engine.evaluate(&input).await;
        assert_eq!(decision.review_status, ReviewStatus::AutoPass);
        assert!((decision.scores.confidence.unwrap() - 0.95).abs() < 1e-9);
        assert!(decision.scores.is_complete());
    }

    #[tokio::test]
    async fn test_reference_uses_utterance() {
        let engine = ValidationEngine::new(VoxcheckConfig::default()).unwrap();
        let input = ValidationInputBuilder::new("Booking Hotel B")
            .utterance("book the second one")
            .context(json!({"items": ["Hotel A", "Hotel B"]}))
            .expected_reference("Hotel B")
            .build();

        let decision = engine.evaluate(&input).await;
        let reference = decision.reference.unwrap();
        assert_eq!(reference.resolved, Some(json!("Hotel B")));
        assert_eq!(reference.matched, Some(true));
    }
}
