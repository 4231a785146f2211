//! Rule-based tolerance checks.
//!
//! The rules attached to a test case select which checks run. Anything the
//! rules leave unset is skipped rather than failed, and a malformed rule is
//! skipped with a warning.

pub mod checks;
pub mod types;

use std::sync::Arc;
use tracing::{debug, warn};

pub use checks::{
    check_alternates, check_confirmation_pattern, check_semantic_similarity,
    validate_entity_presence, validate_forbidden_content, validate_length, validate_tone,
};
pub use types::{
    ConfirmationMode, ConfirmationResult, EntityPresenceResult, ForbiddenContentResult,
    LengthResult, SimilarityResult, ToleranceCheck, ToleranceReport, ToneResult,
};

use crate::config::ToleranceConfig;
use crate::models::ValidationRules;

/// Runs the configured tolerance checks against a response.
#[derive(Debug, Clone)]
pub struct ToleranceEngine {
    config: Arc<ToleranceConfig>,
}

impl ToleranceEngine {
    /// Create an engine from validated configuration.
    pub fn new(config: Arc<ToleranceConfig>) -> Self {
        Self { config }
    }

    /// Run every check the rules configure and fold the results.
    ///
    /// `expected_response` feeds the similarity check, which only runs when
    /// the rules set a `similarity_threshold`.
    pub fn apply_tolerance_checks(
        &self,
        text: &str,
        rules: &ValidationRules,
        expected_response: Option<&str>,
    ) -> ToleranceReport {
        let mut report = ToleranceReport::default();

        if !rules.required_entities.is_empty() {
            report.entity_presence = Some(validate_entity_presence(text, &rules.required_entities));
        }

        if !rules.forbidden_phrases.is_empty() {
            report.forbidden_content =
                Some(validate_forbidden_content(text, &rules.forbidden_phrases));
        }

        if let Some(tone) = rules.tone.as_deref().filter(|t| !t.trim().is_empty()) {
            report.tone = Some(self.validate_tone(text, tone, rules.tone_strict));
        }

        if let Some(max_length) = self.max_length(rules) {
            report.length = Some(validate_length(text, max_length));
        }

        if let Some(threshold) = rules.similarity_threshold {
            let threshold = self.similarity_threshold(threshold);
            report.semantic_similarity = Some(check_semantic_similarity(
                text,
                expected_response.unwrap_or_default(),
                threshold,
            ));
        }

        if let Some(mode) = rules.confirmation.as_deref() {
            match ConfirmationMode::parse(mode) {
                Some(mode) => report.confirmation = Some(self.check_confirmation(text, mode)),
                None => warn!(mode = %mode, "Unknown confirmation mode; check skipped"),
            }
        }

        let report = report.fold();
        debug!(
            overall_passed = report.overall_passed,
            checks = report.outcomes().len(),
            "Tolerance checks complete"
        );
        report
    }

    /// Tone check against the configured cue vocabulary.
    ///
    /// `strict` overrides the configured strictness when set. An unknown
    /// tone class has no cues and is treated as neutral.
    pub fn validate_tone(
        &self,
        text: &str,
        requirement: &str,
        strict: Option<bool>,
    ) -> ToneResult {
        let strict = strict.unwrap_or(self.config.strict_tone);
        let key = requirement.trim().to_lowercase();
        let cues: &[String] = match self.config.tone_cues.get(&key) {
            Some(cues) => cues.as_slice(),
            None => {
                warn!(tone = %requirement, "No cue vocabulary for tone; treating text as neutral");
                &[]
            }
        };
        checks::validate_tone_with(text, requirement, cues, strict)
    }

    /// Confirmation check against the configured patterns.
    pub fn check_confirmation(&self, text: &str, mode: ConfirmationMode) -> ConfirmationResult {
        let patterns = match mode {
            ConfirmationMode::Affirmative => &self.config.affirmative_patterns,
            ConfirmationMode::Negative => &self.config.negative_patterns,
        };
        checks::check_confirmation_with(text, mode, patterns)
    }

    fn max_length(&self, rules: &ValidationRules) -> Option<usize> {
        match rules.max_length {
            Some(max) if max < 0 => {
                warn!(max_length = max, "Negative max_length in rules; length check skipped");
                None
            }
            Some(max) => Some(max as usize),
            None => self.config.max_length.map(|max| max.max(0) as usize),
        }
    }

    fn similarity_threshold(&self, requested: f64) -> f64 {
        if requested.is_finite() && (0.0..=1.0).contains(&requested) {
            requested
        } else {
            warn!(
                threshold = requested,
                fallback = self.config.similarity_threshold,
                "Similarity threshold outside [0, 1]; using configured default"
            );
            self.config.similarity_threshold
        }
    }
}

impl Default for ToleranceEngine {
    fn default() -> Self {
        Self::new(Arc::new(ToleranceConfig::default()))
    }
}
