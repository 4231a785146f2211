//! Configuration system for voxcheck.
//!
//! Configuration is loaded from defaults, files and environment variables,
//! then validated once. Weights, threshold bands and vocabularies are
//! immutable for the lifetime of an engine.

mod builder;
mod loader;
mod models;
pub mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "voxcheck.toml",
    "voxcheck.yaml",
    "voxcheck.yml",
    "voxcheck.json",
    ".voxcheck/config.toml",
    ".voxcheck/config.yaml",
    ".voxcheck/config.yml",
    ".voxcheck/config.json",
];

/// Environment variable prefix for voxcheck configuration
pub const ENV_PREFIX: &str = "VOXCHECK_";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "VOXCHECK_CONFIG";

/// Prefixed variables read by the command line front end rather than the
/// configuration tree.
pub const NON_CONFIG_ENV_KEYS: &[&str] = &["config", "output", "quiet"];

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),

    /// General error
    #[error("{0}")]
    Other(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
