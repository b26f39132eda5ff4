//! Error types for the Extractor
//!
//! These errors never leave the crate's public extraction entry points:
//! strategies turn them into "no match" and the orchestrator moves on.

use thiserror::Error;

/// Errors that can occur inside an extraction strategy
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Model call exceeded its time budget
    #[error("Extraction timeout")]
    Timeout,

    /// Model output is not the expected JSON shape
    #[error("Invalid model output: {0}")]
    InvalidFormat(String),

    /// Model output lacks a normalised intent or gaine
    #[error("Incomplete model output: {0}")]
    Incomplete(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
