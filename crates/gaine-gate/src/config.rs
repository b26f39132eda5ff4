//! Configuration for the transcription gate
//!
//! Pacing and retry constants for the quota-limited transcription service.

use crate::error::GateError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the rate gate and its retry policy
///
/// # Examples
///
/// ```
/// use gaine_gate::GateConfig;
///
/// let config = GateConfig::default();
/// assert_eq!(config.max_retries, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Minimum spacing between two transcription calls (milliseconds)
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Retries after a throttled call before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay; doubles with every retry (milliseconds)
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Upper bound on the backoff delay before jitter (milliseconds)
    #[serde(default = "default_backoff_cap_ms")]
    pub backoff_cap_ms: u64,

    /// Maximum random jitter added to each backoff (milliseconds)
    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,
}

fn default_min_interval_ms() -> u64 {
    1_200
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    1_000
}

fn default_backoff_cap_ms() -> u64 {
    8_000
}

fn default_max_jitter_ms() -> u64 {
    250
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
            max_retries: default_max_retries(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_cap_ms: default_backoff_cap_ms(),
            max_jitter_ms: default_max_jitter_ms(),
        }
    }
}

impl GateConfig {
    /// Strict preset for free-tier quotas: wider spacing, more patience
    pub fn conservative() -> Self {
        Self {
            min_interval_ms: 4_000,
            max_retries: 5,
            backoff_base_ms: 2_000,
            backoff_cap_ms: 30_000,
            max_jitter_ms: 500,
        }
    }

    /// Minimum spacing as a Duration
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), GateError> {
        if self.backoff_base_ms == 0 {
            return Err(GateError::Config("backoff_base_ms must be greater than 0".to_string()));
        }
        if self.backoff_cap_ms < self.backoff_base_ms {
            return Err(GateError::Config("backoff_cap_ms cannot be below backoff_base_ms".to_string()));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, GateError> {
        toml::from_str(toml_str).map_err(|e| GateError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, GateError> {
        toml::to_string_pretty(self)
            .map_err(|e| GateError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
