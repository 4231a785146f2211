//! Interfaces to the ML collaborators the engine consumes.
//!
//! voxcheck does not implement semantic similarity, intent classification or
//! entity extraction. Callers inject one implementation per collaborator when
//! building a [`crate::ValidationEngine`]. Any of them may be left out; the
//! signals they would have produced are then reported as missing.
//!
//! Timeouts, retries and cancellation belong to the implementation or the
//! calling service. Whatever error comes back is treated as an absent signal.

pub mod error;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use error::{CollaboratorError, Result};

/// Semantic similarity between two texts.
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    /// Score the similarity of `a` and `b` in [0, 1].
    async fn score(&self, a: &str, b: &str) -> Result<f64>;
}

/// A label with its classifier score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredLabel {
    /// Intent label
    pub label: String,
    /// Classifier score in [0, 1]
    pub score: f64,
}

/// Output of an intent classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentPrediction {
    /// Best label
    pub label: String,
    /// Score of the best label in [0, 1]
    pub score: f64,
    /// Remaining labels, best first
    pub alternatives: Vec<ScoredLabel>,
}

/// Zero-shot intent classification over a candidate label set.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Pick the best of `candidate_labels` for `text`.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
        locale: Option<&str>,
    ) -> Result<IntentPrediction>;
}

/// A named entity found in free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedEntity {
    /// Entity label, e.g. `city`
    pub label: String,
    /// Surface text
    pub text: String,
    /// Byte span in the source text
    pub span: (usize, usize),
}

impl ExtractedEntity {
    /// Create an extracted entity.
    pub fn new(label: impl Into<String>, text: impl Into<String>, span: (usize, usize)) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            span,
        }
    }
}

/// Named-entity extraction.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    /// Extract entities from `text`.
    async fn extract(&self, text: &str, locale: Option<&str>) -> Result<Vec<ExtractedEntity>>;
}

/// Handles to the injected collaborators.
#[derive(Clone, Default)]
pub struct Collaborators {
    /// Similarity scorer
    pub similarity: Option<Arc<dyn SimilarityScorer>>,
    /// Intent classifier
    pub intent: Option<Arc<dyn IntentClassifier>>,
    /// Entity extractor
    pub entities: Option<Arc<dyn EntityExtractor>>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("similarity", &self.similarity.is_some())
            .field("intent", &self.intent.is_some())
            .field("entities", &self.entities.is_some())
            .finish()
    }
}

/// Check that a collaborator score is usable.
///
/// Out-of-range or non-finite values are rejected rather than clamped.
pub fn checked_score(value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CollaboratorError::invalid_output(format!(
            "score {} outside [0, 1]",
            value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_score() {
        assert_eq!(checked_score(0.0), Ok(0.0));
        assert_eq!(checked_score(1.0), Ok(1.0));
        assert!(checked_score(1.01).is_err());
        assert!(checked_score(-0.1).is_err());
        assert!(checked_score(f64::NAN).is_err());
    }

    #[test]
    fn test_collaborators_debug_hides_handles() {
        let collaborators = Collaborators::default();
        assert_eq!(
            format!("{:?}", collaborators),
            "Collaborators { similarity: false, intent: false, entities: false }"
        );
    }
}
