//! Configuration validation utilities.
//!
//! Every check here runs once at load time. An engine is never built from a
//! configuration that fails validation.

use super::ConfigError;
use super::models::*;
use std::collections::HashSet;

/// Tolerance used when checking that the accuracy weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate the entire configuration.
pub fn validate_config(config: &VoxcheckConfig) -> Result<(), ConfigError> {
    validate_scoring_config(&config.scoring)?;
    validate_decision_config(&config.decision)?;
    validate_tolerance_config(&config.tolerance)?;
    validate_reference_config(&config.reference)?;

    Ok(())
}

/// Validate the accuracy weights.
fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ConfigError> {
    let weights = &config.weights;
    for (name, value) in [
        ("semantic", weights.semantic),
        ("intent", weights.intent),
        ("entity", weights.entity),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "Accuracy weight '{}' must be a non-negative number, got {}",
                name, value
            )));
        }
    }

    let total = weights.total();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::ValidationError(format!(
            "Accuracy weights must sum to 1.0, got {:.6}",
            total
        )));
    }

    Ok(())
}

/// Validate the threshold bands.
fn validate_decision_config(config: &DecisionConfig) -> Result<(), ConfigError> {
    let pass = config.auto_pass_threshold;
    let review = config.review_threshold;

    if !(0.0..=1.0).contains(&pass) {
        return Err(ConfigError::ValidationError(format!(
            "auto_pass_threshold must lie in [0, 1], got {}",
            pass
        )));
    }
    if !(0.0..=1.0).contains(&review) {
        return Err(ConfigError::ValidationError(format!(
            "review_threshold must lie in [0, 1], got {}",
            review
        )));
    }
    if review >= pass {
        return Err(ConfigError::ValidationError(format!(
            "review_threshold ({}) must be below auto_pass_threshold ({})",
            review, pass
        )));
    }

    Ok(())
}

/// Validate tolerance defaults and vocabularies.
fn validate_tolerance_config(config: &ToleranceConfig) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&config.similarity_threshold) {
        return Err(ConfigError::ValidationError(format!(
            "similarity_threshold must lie in [0, 1], got {}",
            config.similarity_threshold
        )));
    }

    if let Some(max_length) = config.max_length
        && max_length < 0
    {
        return Err(ConfigError::ValidationError(format!(
            "max_length cannot be negative, got {}",
            max_length
        )));
    }

    for (tone, cues) in &config.tone_cues {
        if cues.iter().any(|cue| cue.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "Tone '{}' contains an empty cue",
                tone
            )));
        }
    }

    if config.affirmative_patterns.is_empty() || config.negative_patterns.is_empty() {
        return Err(ConfigError::ValidationError(
            "Confirmation pattern lists cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate the reference resolver's phrase tables.
fn validate_reference_config(config: &ReferenceConfig) -> Result<(), ConfigError> {
    if config.context_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Reference context key cannot be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for ordinal in &config.ordinals {
        let phrase = ordinal.phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return Err(ConfigError::ValidationError(
                "Ordinal phrases cannot be empty".to_string(),
            ));
        }
        if !seen.insert(phrase) {
            return Err(ConfigError::ValidationError(format!(
                "Duplicate ordinal phrase '{}'",
                ordinal.phrase
            )));
        }
    }

    Ok(())
}
