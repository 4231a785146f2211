//! Result types for the tolerance checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the individual tolerance checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceCheck {
    EntityPresence,
    ForbiddenContent,
    Tone,
    Length,
    SemanticSimilarity,
    Confirmation,
}

impl ToleranceCheck {
    /// Snake-case name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntityPresence => "entity_presence",
            Self::ForbiddenContent => "forbidden_content",
            Self::Tone => "tone",
            Self::Length => "length",
            Self::SemanticSimilarity => "semantic_similarity",
            Self::Confirmation => "confirmation",
        }
    }
}

impl fmt::Display for ToleranceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required entities that were looked for in the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityPresenceResult {
    pub passed: bool,
    /// Required entity strings absent from the response, in rule order
    pub missing_entities: Vec<String>,
}

/// Forbidden phrases found in the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForbiddenContentResult {
    pub passed: bool,
    /// Forbidden phrases present in the response, in rule order
    pub found_phrases: Vec<String>,
}

/// Lexical tone heuristic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToneResult {
    pub passed: bool,
    /// Requested tone class
    pub tone: String,
    /// 0.5 with no cue, rising with each cue found
    pub confidence: f64,
    /// Cues found in the response
    pub cues_found: Vec<String>,
}

/// Response length against a maximum, both in characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LengthResult {
    pub passed: bool,
    pub actual_length: usize,
    pub max_length: usize,
}

/// Lexical similarity against a threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityResult {
    pub passed: bool,
    pub similarity_score: f64,
    pub threshold: f64,
}

/// Which kind of confirmation a response is expected to contain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationMode {
    Affirmative,
    Negative,
}

impl ConfirmationMode {
    /// Parse a rule value, case-insensitively. Unknown modes yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "affirmative" => Some(Self::Affirmative),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for ConfirmationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Affirmative => write!(f, "affirmative"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Confirmation pattern match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmationResult {
    pub matched: bool,
    /// First pattern that matched, in priority order
    pub matched_pattern: Option<String>,
    pub mode: ConfirmationMode,
}

/// Results of every configured tolerance check for one response.
///
/// A check that was not configured is `None` and does not take part in
/// `overall_passed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToleranceReport {
    pub entity_presence: Option<EntityPresenceResult>,
    pub forbidden_content: Option<ForbiddenContentResult>,
    pub tone: Option<ToneResult>,
    pub length: Option<LengthResult>,
    pub semantic_similarity: Option<SimilarityResult>,
    pub confirmation: Option<ConfirmationResult>,
    /// Logical AND over the checks that ran; true when none ran
    pub overall_passed: bool,
}

impl Default for ToleranceReport {
    fn default() -> Self {
        Self {
            entity_presence: None,
            forbidden_content: None,
            tone: None,
            length: None,
            semantic_similarity: None,
            confirmation: None,
            overall_passed: true,
        }
    }
}

impl ToleranceReport {
    /// Pass/fail of each check that ran, in a fixed order.
    pub fn outcomes(&self) -> Vec<(ToleranceCheck, bool)> {
        let mut outcomes = Vec::new();
        if let Some(r) = &self.entity_presence {
            outcomes.push((ToleranceCheck::EntityPresence, r.passed));
        }
        if let Some(r) = &self.forbidden_content {
            outcomes.push((ToleranceCheck::ForbiddenContent, r.passed));
        }
        if let Some(r) = &self.tone {
            outcomes.push((ToleranceCheck::Tone, r.passed));
        }
        if let Some(r) = &self.length {
            outcomes.push((ToleranceCheck::Length, r.passed));
        }
        if let Some(r) = &self.semantic_similarity {
            outcomes.push((ToleranceCheck::SemanticSimilarity, r.passed));
        }
        if let Some(r) = &self.confirmation {
            outcomes.push((ToleranceCheck::Confirmation, r.matched));
        }
        outcomes
    }

    /// Recompute `overall_passed` from the checks that ran.
    pub fn fold(mut self) -> Self {
        self.overall_passed = self.outcomes().iter().all(|(_, passed)| *passed);
        self
    }

    /// Whether any check ran.
    pub fn is_empty(&self) -> bool {
        self.outcomes().is_empty()
    }

    /// Human-readable descriptions of every failed check.
    pub fn failures(&self) -> Vec<String> {
        let mut failures = Vec::new();

        if let Some(r) = &self.entity_presence {
            for entity in &r.missing_entities {
                failures.push(format!("missing required entity '{}'", entity));
            }
        }
        if let Some(r) = &self.forbidden_content {
            for phrase in &r.found_phrases {
                failures.push(format!("forbidden phrase '{}' detected", phrase));
            }
        }
        if let Some(r) = &self.tone
            && !r.passed
        {
            failures.push(format!("no {} tone cue found", r.tone));
        }
        if let Some(r) = &self.length
            && !r.passed
        {
            failures.push(format!(
                "response length {} exceeds maximum {}",
                r.actual_length, r.max_length
            ));
        }
        if let Some(r) = &self.semantic_similarity
            && !r.passed
        {
            failures.push(format!(
                "lexical similarity {:.2} below threshold {:.2}",
                r.similarity_score, r.threshold
            ));
        }
        if let Some(r) = &self.confirmation
            && !r.matched
        {
            failures.push(format!("no {} confirmation found", r.mode));
        }

        failures
    }
}
