//! Individual tolerance checks.
//!
//! Each check is a free function over plain text so it can be called and
//! tested on its own. [`super::ToleranceEngine`] wires them to configuration.

use super::types::{
    ConfirmationMode, ConfirmationResult, EntityPresenceResult, ForbiddenContentResult,
    LengthResult, SimilarityResult, ToneResult,
};
use crate::text::{contains_word, normalize, token_overlap};

/// Default affirmative confirmation words, in priority order.
pub const AFFIRMATIVE_PATTERNS: &[&str] = &["yes", "correct", "right", "sure", "okay"];

/// Default negative confirmation words, in priority order.
pub const NEGATIVE_PATTERNS: &[&str] = &["no", "don't", "dont", "not", "never"];

/// Default cue vocabulary per tone class.
pub const DEFAULT_TONE_CUES: &[(&str, &[&str])] = &[
    ("polite", &["thank you", "please", "happy to help"]),
    ("professional", &["based on", "analysis", "data", "indicates"]),
];

/// Confidence reported when no tone cue is present.
pub const NEUTRAL_TONE_CONFIDENCE: f64 = 0.5;

const TONE_CUE_STEP: f64 = 0.1;

/// Check that every required entity string appears in the text.
///
/// Matching is a case-insensitive substring test. An empty list passes.
pub fn validate_entity_presence(text: &str, required: &[String]) -> EntityPresenceResult {
    let haystack = normalize(text);
    let missing_entities: Vec<String> = required
        .iter()
        .filter(|entity| !haystack.contains(&normalize(entity)))
        .cloned()
        .collect();

    EntityPresenceResult {
        passed: missing_entities.is_empty(),
        missing_entities,
    }
}

/// Check that no forbidden phrase appears in the text.
///
/// Matching is a case-insensitive substring test. Blank phrases are ignored.
pub fn validate_forbidden_content(text: &str, forbidden: &[String]) -> ForbiddenContentResult {
    let haystack = normalize(text);
    let found_phrases: Vec<String> = forbidden
        .iter()
        .filter(|phrase| {
            let needle = normalize(phrase.trim());
            !needle.is_empty() && haystack.contains(&needle)
        })
        .cloned()
        .collect();

    ForbiddenContentResult {
        passed: found_phrases.is_empty(),
        found_phrases,
    }
}

/// Tone heuristic over the built-in cue vocabulary, treating cue-less text
/// as neutral and passing.
pub fn validate_tone(text: &str, requirement: &str) -> ToneResult {
    let tone = requirement.trim().to_lowercase();
    let cues: Vec<String> = DEFAULT_TONE_CUES
        .iter()
        .find(|(name, _)| *name == tone)
        .map(|(_, cues)| cues.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    validate_tone_with(text, requirement, &cues, false)
}

/// Tone heuristic over a given cue vocabulary.
///
/// Each distinct cue found raises the confidence above 0.5, capped at 1.0.
/// Without any cue the confidence is exactly 0.5, and the check passes
/// unless `strict` is set.
pub fn validate_tone_with(
    text: &str,
    requirement: &str,
    cues: &[String],
    strict: bool,
) -> ToneResult {
    let haystack = normalize(text);
    let cues_found: Vec<String> = cues
        .iter()
        .filter(|cue| contains_word(&haystack, &normalize(cue.trim())))
        .cloned()
        .collect();

    let confidence = if cues_found.is_empty() {
        NEUTRAL_TONE_CONFIDENCE
    } else {
        (NEUTRAL_TONE_CONFIDENCE + TONE_CUE_STEP * cues_found.len() as f64).min(1.0)
    };

    ToneResult {
        passed: !cues_found.is_empty() || !strict,
        tone: requirement.to_string(),
        confidence,
        cues_found,
    }
}

/// Check the text length in characters against a maximum.
pub fn validate_length(text: &str, max_length: usize) -> LengthResult {
    let actual_length = text.chars().count();
    LengthResult {
        passed: actual_length <= max_length,
        actual_length,
        max_length,
    }
}

/// Lexical similarity check used when no similarity collaborator exists.
///
/// Either side empty scores 0 and fails. Otherwise the score is the
/// token-set overlap ratio and the check passes at or above `threshold`.
pub fn check_semantic_similarity(
    actual: &str,
    expected: &str,
    threshold: f64,
) -> SimilarityResult {
    let similarity_score = if actual.trim().is_empty() || expected.trim().is_empty() {
        0.0
    } else {
        token_overlap(actual, expected)
    };

    SimilarityResult {
        passed: !actual.trim().is_empty()
            && !expected.trim().is_empty()
            && similarity_score >= threshold,
        similarity_score,
        threshold,
    }
}

/// Look for a confirmation word using the built-in vocabularies.
pub fn check_confirmation_pattern(text: &str, mode: ConfirmationMode) -> ConfirmationResult {
    let patterns = match mode {
        ConfirmationMode::Affirmative => AFFIRMATIVE_PATTERNS,
        ConfirmationMode::Negative => NEGATIVE_PATTERNS,
    };
    let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
    check_confirmation_with(text, mode, &patterns)
}

/// Look for the first of `patterns`, in priority order, as a whole word.
pub fn check_confirmation_with(
    text: &str,
    mode: ConfirmationMode,
    patterns: &[String],
) -> ConfirmationResult {
    let haystack = normalize(text);
    let matched_pattern = patterns
        .iter()
        .find(|pattern| contains_word(&haystack, &normalize(pattern.trim())))
        .cloned();

    ConfirmationResult {
        matched: matched_pattern.is_some(),
        matched_pattern,
        mode,
    }
}

/// Whether the response exactly equals one of the accepted alternates.
pub fn check_alternates(response: &str, alternates: &[String]) -> bool {
    alternates.iter().any(|alternate| alternate == response)
}
