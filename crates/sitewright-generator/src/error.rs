//! Error types for the Generator

use sitewright_llm::LlmError;
use sitewright_validator::ValidationError;
use thiserror::Error;

/// The model output could not be turned into any candidate document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// Nothing usable in the model output
    #[error("Invalid response format from model")]
    Parse {
        /// The model's raw text, kept for diagnostics
        raw: String,
    },
}

/// Errors that can occur during generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Prompt missing, blank or too long
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Required configuration is missing
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model invocation failed
    #[error("Model error: {0}")]
    Model(#[from] LlmError),

    /// Model output could not be parsed
    #[error("Invalid response format from model")]
    Parse {
        /// The model's raw text
        raw: String,
    },

    /// Candidate document failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Content store error
    #[error("Store error: {0}")]
    Store(String),
}

impl From<SanitizeError> for GeneratorError {
    fn from(e: SanitizeError) -> Self {
        match e {
            SanitizeError::Parse { raw } => GeneratorError::Parse { raw },
        }
    }
}
