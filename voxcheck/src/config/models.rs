//! Configuration model definitions.
//!
//! This module contains the configuration structures for all voxcheck components.

use crate::tolerance::checks::{AFFIRMATIVE_PATTERNS, DEFAULT_TONE_CUES, NEGATIVE_PATTERNS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure for voxcheck.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct VoxcheckConfig {
    /// Score fusion configuration
    pub scoring: ScoringConfig,

    /// Review status thresholds
    pub decision: DecisionConfig,

    /// Rule-based tolerance check configuration
    pub tolerance: ToleranceConfig,

    /// Conversational reference resolution configuration
    pub reference: ReferenceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weights used to fold the three match signals into an accuracy score.
///
/// The weights form a convex combination and must sum to 1.0. This is
/// checked once when the configuration is built or loaded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccuracyWeights {
    /// Weight of the semantic similarity score
    pub semantic: f64,

    /// Weight of the intent match score
    pub intent: f64,

    /// Weight of the entity match score
    pub entity: f64,
}

impl Default for AccuracyWeights {
    fn default() -> Self {
        Self {
            semantic: 0.4,
            intent: 0.4,
            entity: 0.2,
        }
    }
}

impl AccuracyWeights {
    /// Create a weight triple.
    pub fn new(semantic: f64, intent: f64, entity: f64) -> Self {
        Self {
            semantic,
            intent,
            entity,
        }
    }

    /// Sum of the three weights.
    pub fn total(&self) -> f64 {
        self.semantic + self.intent + self.entity
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Accuracy weights
    pub weights: AccuracyWeights,

    /// Use token overlap as the similarity signal when no similarity
    /// scorer has been supplied
    pub lexical_fallback: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: AccuracyWeights::default(),
            lexical_fallback: true,
        }
    }
}

/// Threshold bands for the review status.
///
/// `confidence >= auto_pass_threshold` passes automatically,
/// `confidence < review_threshold` fails automatically and everything in
/// between is routed to a human reviewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecisionConfig {
    /// Lower bound of the auto-pass band
    pub auto_pass_threshold: f64,

    /// Lower bound of the needs-review band
    pub review_threshold: f64,

    /// Report matched and missing criteria alongside the decision
    pub report_partial_success: bool,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            auto_pass_threshold: 0.75,
            review_threshold: 0.40,
            report_partial_success: false,
        }
    }
}

/// Tolerance check configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Default threshold for the lexical similarity check
    pub similarity_threshold: f64,

    /// Treat cue-less text as a tone failure
    pub strict_tone: bool,

    /// Maximum response length applied when a test case sets none
    pub max_length: Option<i64>,

    /// Cue vocabulary per tone class
    pub tone_cues: BTreeMap<String, Vec<String>>,

    /// Affirmative confirmation words in priority order
    pub affirmative_patterns: Vec<String>,

    /// Negative confirmation words in priority order
    pub negative_patterns: Vec<String>,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        let tone_cues = DEFAULT_TONE_CUES
            .iter()
            .map(|(tone, cues)| (tone.to_string(), to_strings(cues)))
            .collect();

        Self {
            similarity_threshold: 0.5,
            strict_tone: false,
            max_length: None,
            tone_cues,
            affirmative_patterns: to_strings(AFFIRMATIVE_PATTERNS),
            negative_patterns: to_strings(NEGATIVE_PATTERNS),
        }
    }
}

/// A phrase that points at a position in the conversational context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrdinalPhrase {
    /// Phrase as spoken, matched case-insensitively on word boundaries
    pub phrase: String,

    /// Zero-based index into the context list
    pub index: usize,
}

impl OrdinalPhrase {
    /// Create an ordinal phrase.
    pub fn new(phrase: impl Into<String>, index: usize) -> Self {
        Self {
            phrase: phrase.into(),
            index,
        }
    }
}

/// Reference resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Key holding the ordered item list inside the conversational context
    pub context_key: String,

    /// Ordinal phrases and the index each one selects
    pub ordinals: Vec<OrdinalPhrase>,

    /// Demonstrative phrases, resolved only against a single-item list
    pub demonstratives: Vec<String>,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            context_key: "items".to_string(),
            ordinals: vec![
                OrdinalPhrase::new("first one", 0),
                OrdinalPhrase::new("first", 0),
                OrdinalPhrase::new("the second", 1),
                OrdinalPhrase::new("second", 1),
                OrdinalPhrase::new("third", 2),
                OrdinalPhrase::new("fourth", 3),
                OrdinalPhrase::new("fifth", 4),
            ],
            demonstratives: to_strings(&["that one", "this one"]),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
