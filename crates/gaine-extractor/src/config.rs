//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the extraction orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Try the language-model strategy before the rule-based ones
    #[serde(default)]
    pub use_llm: bool,

    /// Maximum time for a single model call (seconds)
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,

    /// Longer transcripts are cut to this many characters before extraction
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

fn default_llm_timeout_secs() -> u64 {
    15
}

fn default_max_text_length() -> usize {
    2_000
}

impl Default for ExtractorConfig {
    /// Rule-based extraction only
    fn default() -> Self {
        Self {
            use_llm: false,
            llm_timeout_secs: default_llm_timeout_secs(),
            max_text_length: default_max_text_length(),
        }
    }
}

impl ExtractorConfig {
    /// Model-first preset
    pub fn with_llm() -> Self {
        Self {
            use_llm: true,
            ..Self::default()
        }
    }

    /// Get the model timeout as a Duration
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_text_length == 0 {
            return Err(ExtractorError::Config("max_text_length must be greater than 0".to_string()));
        }
        if self.use_llm && self.llm_timeout_secs == 0 {
            return Err(ExtractorError::Config("llm_timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
