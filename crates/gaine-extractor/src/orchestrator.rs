//! Extraction orchestrator - the ordered strategy chain

use crate::anchor::AnchorStrategy;
use crate::config::ExtractorConfig;
use crate::fallback;
use crate::model::ModelExtractor;
use crate::normalize::truncate_chars;
use crate::strategy::{ExtractionStrategy, StrategyKind};
use gaine_domain::{LlmProvider, StructuredQuery, TimeRef};
use tracing::{debug, info, warn};

/// A query together with the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The (possibly partial) query
    pub query: StructuredQuery,

    /// Strategy that produced `query`
    pub source: StrategyKind,
}

/// Chooses among the extraction strategies in fixed priority order
///
/// The first strategy that returns a query wins; results are never merged
/// across strategies. When every strategy declines, the fallback lookups
/// compose the answer, so [`Orchestrator::run`] always yields a query.
pub struct Orchestrator {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    config: ExtractorConfig,
}

impl Orchestrator {
    /// Rule-based chain: anchor syntax, then fallback
    pub fn new(config: ExtractorConfig) -> Self {
        Self::with_strategies(config, vec![Box::new(AnchorStrategy)])
    }

    /// Model first when `config.use_llm` is set, then anchor, then fallback
    ///
    /// With the flag off the provider is dropped and never called.
    pub fn with_model<L>(config: ExtractorConfig, provider: L) -> Self
    where
        L: LlmProvider + 'static,
    {
        let mut strategies: Vec<Box<dyn ExtractionStrategy>> = Vec::new();
        if config.use_llm {
            strategies.push(Box::new(ModelExtractor::new(provider, config.llm_timeout())));
        }
        strategies.push(Box::new(AnchorStrategy));
        Self::with_strategies(config, strategies)
    }

    /// Custom chain; the fallback composition always runs last
    pub fn with_strategies(config: ExtractorConfig, strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies, config }
    }

    /// Strategy order, fallback included
    pub fn chain(&self) -> Vec<StrategyKind> {
        self.strategies
            .iter()
            .map(|s| s.kind())
            .chain(std::iter::once(StrategyKind::Fallback))
            .collect()
    }

    /// Extract a query from a transcript
    pub async fn run(&self, text: &str) -> Resolution {
        let text = if text.chars().count() > self.config.max_text_length {
            warn!("Transcript longer than {} chars, truncating", self.config.max_text_length);
            truncate_chars(text, self.config.max_text_length)
        } else {
            text
        };

        for strategy in &self.strategies {
            match strategy.extract(text).await {
                Some(query) => {
                    info!("Query resolved by {} strategy", strategy.kind());
                    return Resolution {
                        query,
                        source: strategy.kind(),
                    };
                }
                None => debug!("{} strategy found no match", strategy.kind()),
            }
        }

        let query = compose_fallback(text);
        if query.is_empty() {
            debug!("Fallback lookups found nothing");
        } else {
            info!("Query resolved by fallback lookups");
        }

        Resolution {
            query,
            source: StrategyKind::Fallback,
        }
    }
}

/// Run the three fallback lookups and assemble whatever they found
fn compose_fallback(text: &str) -> StructuredQuery {
    let time = fallback::find_date(text).map(TimeRef::day).unwrap_or_default();
    StructuredQuery::new(fallback::find_intent(text), fallback::find_gaine(text), time)
}
