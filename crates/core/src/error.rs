//! Error types for the Apseva CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: request validation, the search gateway, answer
//! generation, configuration, I/O, and serialization.

use thiserror::Error;

/// Unified error type for the Apseva CLI.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid search request (missing/empty query, out-of-range parameter).
    /// Reported to the caller; no pipeline execution happens.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Search provider errors (unreachable, non-2xx, timeout).
    /// Surfaced as a request failure; never retried silently.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// LLM answer-generation errors, labeled with the underlying cause
    #[error("Answer generation error: {0}")]
    AnswerGeneration(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
