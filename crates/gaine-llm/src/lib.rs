//! Gaine LLM Provider Layer
//!
//! Pluggable language-model providers for the optional model-based
//! extraction strategy.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API with schema-constrained JSON output
//!
//! # Examples
//!
//! ```
//! use gaine_llm::MockProvider;
//! use gaine_domain::LlmProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"intent": "stock"}"#);
//! let result = provider
//!     .generate_structured("instructions", "stock gl90", "{}")
//!     .await
//!     .unwrap();
//! assert_eq!(result, r#"{"intent": "stock"}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use gaine_domain::LlmProvider;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Marker response that makes [`MockProvider`] fail
const MOCK_ERROR: &str = "ERROR";

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses keyed by the utterance text, without any
/// network call. Clones share the same response table and call counter.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all inputs
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add a specific response for a given utterance
    pub fn add_response(&mut self, input: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(input.into(), response.into());
    }

    /// Configure to return an error for a specific utterance
    pub fn add_error(&mut self, input: impl Into<String>) {
        self.add_response(input, MOCK_ERROR);
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate_structured(
        &self,
        _instructions: &str,
        input: &str,
        _schema: &str,
    ) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.get(input) {
            Some(response) if response == MOCK_ERROR => Err(LlmError::Other("Mock error".to_string())),
            Some(response) => Ok(response.clone()),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured("sys", "any input", "{}").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("les sorties", r#"{"intent": "sorties"}"#);
        provider.add_response("stock", r#"{"intent": "stock"}"#);

        assert_eq!(
            provider.generate_structured("", "les sorties", "").await.unwrap(),
            r#"{"intent": "sorties"}"#
        );
        assert_eq!(
            provider.generate_structured("", "stock", "").await.unwrap(),
            r#"{"intent": "stock"}"#
        );
        assert_eq!(provider.generate_structured("", "autre", "").await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("{}");
        assert_eq!(provider.call_count(), 0);

        provider.generate_structured("", "a", "").await.unwrap();
        provider.generate_structured("", "b", "").await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad input");

        let result = provider.generate_structured("", "bad input", "").await;
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("{}");
        let provider2 = provider1.clone();

        provider1.generate_structured("", "x", "").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
