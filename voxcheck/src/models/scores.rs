//! Score set produced by the scoring engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A signal the scoring engine tries to compute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Similarity between the response and the expected response
    SemanticSimilarity,
    /// Agreement between predicted and expected intent
    IntentMatch,
    /// Classifier confidence for its chosen label
    IntentConfidence,
    /// Agreement between actual and expected entities
    EntityMatch,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SemanticSimilarity => write!(f, "semantic similarity"),
            Self::IntentMatch => write!(f, "intent match"),
            Self::IntentConfidence => write!(f, "intent confidence"),
            Self::EntityMatch => write!(f, "entity match"),
        }
    }
}

/// Why a signal could not be computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MissingReason {
    /// Neither a transcript nor response text was available
    EmptyTranscript,
    /// The test case has no expected response text
    NoExpectedResponse,
    /// The test case has no expected intent
    NoExpectedIntent,
    /// No entity map was captured and none could be extracted
    NoEntities,
    /// No collaborator or fallback can produce this signal
    NoCollaborator,
    /// The collaborator call failed
    CollaboratorFailed(String),
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTranscript => write!(f, "empty transcript"),
            Self::NoExpectedResponse => write!(f, "no expected response"),
            Self::NoExpectedIntent => write!(f, "no expected intent"),
            Self::NoEntities => write!(f, "no entities captured"),
            Self::NoCollaborator => write!(f, "no collaborator available"),
            Self::CollaboratorFailed(msg) => write!(f, "collaborator failed: {}", msg),
        }
    }
}

/// A signal that is unknown for this evaluation.
///
/// Missing signals are data, not errors. The decision policy treats each one
/// as a vote for human review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissingSignal {
    /// Which signal is missing
    pub signal: Signal,
    /// Why it is missing
    pub reason: MissingReason,
}

impl MissingSignal {
    /// Create a missing signal record.
    pub fn new(signal: Signal, reason: MissingReason) -> Self {
        Self { signal, reason }
    }
}

impl fmt::Display for MissingSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.signal, self.reason)
    }
}

/// Scores computed for one evaluation. Every present value lies in [0, 1].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreSet {
    /// Similarity between response and expected response
    pub semantic_similarity: Option<f64>,

    /// 1.0 when the predicted intent equals the expected one, else 0.0
    pub intent_match: Option<f64>,

    /// Fraction of expected entities matched exactly
    pub entity_match: Option<f64>,

    /// Classifier confidence for the predicted intent
    pub intent_confidence: Option<f64>,

    /// The predicted intent label, if any
    pub predicted_intent: Option<String>,

    /// Weighted combination of the three match scores
    pub accuracy: Option<f64>,

    /// Mean of semantic similarity and intent confidence
    pub confidence: Option<f64>,

    /// Signals that could not be computed
    pub missing: Vec<MissingSignal>,
}

impl ScoreSet {
    /// Whether every signal was computed.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Whether the given signal is missing.
    pub fn is_missing(&self, signal: Signal) -> bool {
        self.missing.iter().any(|m| m.signal == signal)
    }
}
