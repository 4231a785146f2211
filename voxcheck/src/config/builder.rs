//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;

/// Builder for creating VoxcheckConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: VoxcheckConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: VoxcheckConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: VoxcheckConfig) -> Self {
        Self { config }
    }

    /// Set the accuracy weights. They are checked in [`ConfigBuilder::build`].
    pub fn with_weights(mut self, semantic: f64, intent: f64, entity: f64) -> Self {
        self.config.scoring.weights = AccuracyWeights::new(semantic, intent, entity);
        self
    }

    /// Enable or disable the lexical similarity fallback.
    pub fn with_lexical_fallback(mut self, enabled: bool) -> Self {
        self.config.scoring.lexical_fallback = enabled;
        self
    }

    /// Set the review status threshold bands.
    pub fn with_thresholds(mut self, auto_pass: f64, review: f64) -> Self {
        self.config.decision.auto_pass_threshold = auto_pass;
        self.config.decision.review_threshold = review;
        self
    }

    /// Report matched and missing criteria with every decision.
    pub fn with_partial_success_reporting(mut self) -> Self {
        self.config.decision.report_partial_success = true;
        self
    }

    /// Set the default lexical similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.config.tolerance.similarity_threshold = threshold;
        self
    }

    /// Treat cue-less responses as failing a tone requirement.
    pub fn with_strict_tone(mut self, strict: bool) -> Self {
        self.config.tolerance.strict_tone = strict;
        self
    }

    /// Set the default maximum response length.
    pub fn with_max_length(mut self, max_length: i64) -> Self {
        self.config.tolerance.max_length = Some(max_length);
        self
    }

    /// Add or replace the cue vocabulary for a tone class.
    pub fn with_tone_cues<I, S>(mut self, tone: impl Into<String>, cues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .tolerance
            .tone_cues
            .insert(tone.into(), cues.into_iter().map(Into::into).collect());
        self
    }

    /// Add an ordinal phrase to the reference resolver.
    pub fn with_ordinal(mut self, phrase: impl Into<String>, index: usize) -> Self {
        self.config
            .reference
            .ordinals
            .push(OrdinalPhrase::new(phrase, index));
        self
    }

    /// Set the context key holding the ordered item list.
    pub fn with_context_key(mut self, key: impl Into<String>) -> Self {
        self.config.reference.context_key = key.into();
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self.config.logging.stdout = false;
        self
    }

    /// Create a configuration for development.
    ///
    /// Debug logging in the pretty format, partial success reporting on.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
            .with_partial_success_reporting()
    }

    /// Create a strict configuration.
    ///
    /// Cue-less text fails tone requirements and the lexical fallback is
    /// disabled, so a missing similarity scorer routes every case to review.
    pub fn strict() -> Self {
        Self::new()
            .with_strict_tone(true)
            .with_lexical_fallback(false)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<VoxcheckConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
