//! Language-model extraction strategy

use crate::error::ExtractorError;
use crate::parser::parse_model_response;
use crate::prompt::{EXTRACTION_INSTRUCTIONS, RESPONSE_SCHEMA};
use crate::strategy::{ExtractionStrategy, StrategyKind};
use async_trait::async_trait;
use gaine_domain::{LlmProvider, StructuredQuery};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Delegates extraction to a schema-constrained model call
///
/// A single request is made per utterance. Transport errors, timeouts,
/// unparseable output and incomplete output all count as "no match".
pub struct ModelExtractor<L> {
    provider: L,
    timeout: Duration,
}

impl<L> ModelExtractor<L>
where
    L: LlmProvider,
{
    /// Create a model extractor with a per-call time budget
    pub fn new(provider: L, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Run the model and normalise its answer
    pub async fn try_extract(&self, text: &str) -> Result<StructuredQuery, ExtractorError> {
        let response = timeout(
            self.timeout,
            self.provider
                .generate_structured(EXTRACTION_INSTRUCTIONS, text, RESPONSE_SCHEMA),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("Model '{}' response length: {} chars", self.provider.model_name(), response.len());

        parse_model_response(&response)
    }
}

#[async_trait]
impl<L> ExtractionStrategy for ModelExtractor<L>
where
    L: LlmProvider,
{
    fn kind(&self) -> StrategyKind {
        StrategyKind::Model
    }

    async fn extract(&self, text: &str) -> Option<StructuredQuery> {
        match self.try_extract(text).await {
            Ok(query) => Some(query),
            Err(e @ (ExtractorError::Llm(_) | ExtractorError::Timeout)) => {
                warn!("Model extraction unavailable: {}", e);
                None
            }
            Err(e) => {
                debug!("Model extraction rejected: {}", e);
                None
            }
        }
    }
}
