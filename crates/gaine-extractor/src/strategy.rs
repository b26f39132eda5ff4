//! Extraction strategies and their identities

use async_trait::async_trait;
use gaine_domain::StructuredQuery;
use serde::Serialize;
use std::fmt;

/// Which strategy produced a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Schema-constrained language model
    Model,
    /// "les <intent> de <gaine> ..." sentence pattern
    Anchor,
    /// Independent keyword/regex lookups
    Fallback,
}

impl StrategyKind {
    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Model => "model",
            StrategyKind::Anchor => "anchor",
            StrategyKind::Fallback => "fallback",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the orchestrator's priority chain
///
/// Returning `None` means "no match, ask the next strategy". Strategies
/// absorb their own failures; nothing here returns an error.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Identity used for logging and in the resolution
    fn kind(&self) -> StrategyKind;

    /// Try to extract a query from `text`
    async fn extract(&self, text: &str) -> Option<StructuredQuery>;
}
