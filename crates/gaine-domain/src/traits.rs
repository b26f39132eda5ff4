//! Trait definitions for external interactions
//!
//! These traits define the boundaries between extraction logic and the
//! services around it. Implementations live in other crates.

use crate::{AudioClip, StructuredQuery};
use async_trait::async_trait;
use thiserror::Error;

/// Trait for schema-constrained language-model calls
///
/// Implemented by the infrastructure layer (gaine-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send;

    /// Generate a JSON document constrained by `schema`
    ///
    /// `instructions` is the system prompt, `input` the user utterance.
    /// Implementations sample deterministically (temperature zero).
    async fn generate_structured(
        &self,
        instructions: &str,
        input: &str,
        schema: &str,
    ) -> Result<String, Self::Error>;

    /// Model name for logging
    fn model_name(&self) -> &str;
}

/// Errors returned by a transcription service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    /// Rejected because of rate or quota limits; worth retrying later
    #[error("Throttled: {0}")]
    Throttled(String),

    /// Any other failure; retrying will not help
    #[error("Transcription failed: {0}")]
    Failed(String),
}

impl TranscriptionError {
    /// Classify a raw failure message
    ///
    /// Messages mentioning HTTP 429, quota, rate limits or resource
    /// exhaustion become [`TranscriptionError::Throttled`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gaine_domain::TranscriptionError;
    ///
    /// assert!(TranscriptionError::classify("HTTP 429: Too Many Requests").is_throttle());
    /// assert!(!TranscriptionError::classify("invalid audio").is_throttle());
    /// assert!(!TranscriptionError::classify("HTTP 400: audio 1429 ms too short").is_throttle());
    /// ```
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        let throttled = ["http 429", "quota", "rate limit", "rate_limit", "resource_exhausted", "too many requests"]
            .iter()
            .any(|marker| lower.contains(marker));
        if throttled {
            TranscriptionError::Throttled(message)
        } else {
            TranscriptionError::Failed(message)
        }
    }

    /// Whether this failure is a rate/quota rejection
    pub fn is_throttle(&self) -> bool {
        matches!(self, TranscriptionError::Throttled(_))
    }
}

/// Trait for a quota-limited speech-to-text service
///
/// Callers must go through the rate gate (gaine-gate), never call this directly.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe one audio clip into plain text
    async fn transcribe(&self, audio: &AudioClip) -> Result<String, TranscriptionError>;

    /// Model name for logging
    fn model_name(&self) -> &str;
}

/// Trait for the downstream inventory router
///
/// Turns a complete query into a human-readable reply. The reply is opaque
/// to this workspace.
#[async_trait]
pub trait QueryRouter: Send + Sync {
    /// Error type for routing operations
    type Error: std::fmt::Display + Send;

    /// Route a query on behalf of `caller`
    async fn route(&self, query: &StructuredQuery, caller: &str) -> Result<String, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_throttle_markers() {
        for message in [
            "HTTP 429 Too Many Requests",
            "You exceeded your current quota",
            "Rate limit reached for whisper-1",
            "RESOURCE_EXHAUSTED",
        ] {
            assert!(TranscriptionError::classify(message).is_throttle(), "{}", message);
        }
    }

    #[test]
    fn test_digits_429_inside_other_errors_are_terminal() {
        let error = TranscriptionError::classify("HTTP 400: audio 1429 ms too short");
        assert_eq!(error, TranscriptionError::Failed("HTTP 400: audio 1429 ms too short".to_string()));
        assert!(!TranscriptionError::classify("HTTP 500: job 4290 crashed").is_throttle());
    }
}
