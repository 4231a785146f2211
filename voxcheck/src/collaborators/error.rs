//! Error types for collaborator calls

use std::fmt;
use thiserror::Error;

/// Error returned by a similarity scorer, intent classifier or entity
/// extractor.
///
/// The engine never propagates these. Each one is turned into a missing
/// signal at the call site.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The backing model or service is not reachable
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    /// The call was made but failed
    #[error("Collaborator call failed: {0}")]
    Failed(String),

    /// The caller's deadline expired
    #[error("Collaborator timed out: {0}")]
    Timeout(String),

    /// The collaborator answered with something unusable
    #[error("Invalid collaborator output: {0}")]
    InvalidOutput(String),
}

impl CollaboratorError {
    /// Create a new unavailable error
    pub fn unavailable(msg: impl fmt::Display) -> Self {
        Self::Unavailable(msg.to_string())
    }

    /// Create a new failed error
    pub fn failed(msg: impl fmt::Display) -> Self {
        Self::Failed(msg.to_string())
    }

    /// Create a new timeout error
    pub fn timeout(msg: impl fmt::Display) -> Self {
        Self::Timeout(msg.to_string())
    }

    /// Create a new invalid output error
    pub fn invalid_output(msg: impl fmt::Display) -> Self {
        Self::InvalidOutput(msg.to_string())
    }
}

/// Result type for collaborator calls
pub type Result<T> = std::result::Result<T, CollaboratorError>;
