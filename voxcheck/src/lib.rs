//! # voxcheck
//!
//! Validation and escalation decision engine for voice assistant test
//! automation.
//!
//! Given what an assistant actually said and what a test case expected,
//! voxcheck produces a graded judgment: pass automatically, fail
//! automatically, or route to a human reviewer. It fuses semantic similarity,
//! intent agreement and entity agreement into accuracy and confidence
//! scores, runs rule-based tolerance checks, resolves conversational
//! references like "the second one", and applies fixed threshold bands.
//!
//! ## Quick Start
//!
//! ```no_run
//! use voxcheck::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let engine = init_with_defaults()?;
//!
//!     let input = ValidationInputBuilder::new("The weather in New York is sunny")
//!         .expected_intent("get_weather")
//!         .expected_response("It is sunny in New York")
//!         .build();
//!
//!     let decision = engine.evaluate(&input).await;
//!     println!("{}: {}", decision.review_status, decision.rationale);
//!     Ok(())
//! }
//! ```
//!
//! ## Collaborators
//!
//! The ML primitives are not part of this crate. Semantic similarity, intent
//! classification and entity extraction are consumed through the traits in
//! [`collaborators`] and injected with [`ValidationEngine::builder`]. When a
//! collaborator is absent or fails, the affected signal is recorded as
//! missing and the result is routed to review rather than scored on a
//! fabricated default.

pub mod collaborators;
pub mod config;
pub mod decision;
pub mod engine;
pub mod logging;
pub mod models;
pub mod reference;
pub mod scoring;
pub mod signals;
pub mod text;
pub mod tolerance;

pub use engine::{ValidationEngine, ValidationEngineBuilder};

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::{init, init_with_defaults};

    pub use crate::engine::{ValidationEngine, ValidationEngineBuilder};

    pub use crate::config::{
        AccuracyWeights, ConfigBuilder, ConfigLoader, LogFormat, LogLevel, VoxcheckConfig,
    };

    pub use crate::models::{
        Decision, MissingReason, MissingSignal, PartialSuccess, ReviewStatus, ScoreSet, Signal,
        ValidationInput, ValidationInputBuilder, ValidationRules,
    };

    pub use crate::collaborators::{
        CollaboratorError, EntityExtractor, ExtractedEntity, IntentClassifier, IntentPrediction,
        ScoredLabel, SimilarityScorer,
    };

    pub use crate::reference::ReferenceOutcome;
    pub use crate::tolerance::ToleranceReport;

    pub use crate::{Result, VoxcheckError};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for voxcheck operations
///
/// Evaluation itself never fails. These errors come from setting the engine
/// up and from the surrounding tooling.
#[derive(Debug, thiserror::Error)]
pub enum VoxcheckError {
    /// Configuration rejected at load or build time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// A validation input could not be read
    #[error("Input error: {0}")]
    Input(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for VoxcheckError {
    fn from(err: crate::config::ConfigError) -> Self {
        VoxcheckError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for VoxcheckError {
    fn from(err: serde_json::Error) -> Self {
        VoxcheckError::Input(err.to_string())
    }
}

/// Result type for voxcheck operations
pub type Result<T> = std::result::Result<T, VoxcheckError>;

/// Build an engine from configuration found in the default locations
///
/// Defaults are overlaid with the file named by `VOXCHECK_CONFIG` or the
/// first configuration file found (see [`config::DEFAULT_CONFIG_FILES`]),
/// and then with `VOXCHECK_`-prefixed environment variables.
pub fn init_with_defaults() -> Result<ValidationEngine> {
    let config = config::ConfigLoader::new()
        .load_default_files()?
        .load_env()
        .extract()?;
    init(config)
}

/// Build an engine without collaborators from the provided configuration
///
/// Logging is not touched; call [`logging::init`] separately and keep the
/// returned guard alive when logging to a file.
///
/// # Examples
///
/// ```rust
/// use voxcheck::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = ConfigBuilder::new()
///         .with_weights(0.5, 0.3, 0.2)
///         .with_thresholds(0.8, 0.5)
///         .build()?;
///
///     let engine = init(config)?;
///     assert_eq!(engine.config().decision.auto_pass_threshold, 0.8);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub fn init(config: config::VoxcheckConfig) -> Result<ValidationEngine> {
    ValidationEngine::new(config)
}
