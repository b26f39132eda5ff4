//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use gaine_extractor::ExtractorConfig;
use gaine_gate::GateConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Enables the model strategy when set to `1`, `true`, `yes` or `on`.
pub const ENV_USE_LLM: &str = "GAINE_USE_LLM";

/// API key for the transcription service.
pub const ENV_TRANSCRIBE_API_KEY: &str = "GAINE_TRANSCRIBE_API_KEY";

/// Language-model endpoint.
pub const ENV_LLM_ENDPOINT: &str = "GAINE_LLM_ENDPOINT";

/// Whole-application configuration, one TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extraction chain
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Transcription pacing and retries
    #[serde(default)]
    pub gate: GateConfig,

    /// Language-model service
    #[serde(default)]
    pub llm: LlmSettings,

    /// Transcription service
    #[serde(default)]
    pub transcription: TranscriptionSettings,
}

/// Language-model service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Ollama endpoint
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// HTTP timeout (seconds)
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

/// Transcription service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionSettings {
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_transcription_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_transcription_model")]
    pub model: String,

    /// Bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Spoken language hint
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            endpoint: default_transcription_endpoint(),
            model: default_transcription_model(),
            api_key: None,
            language: default_language(),
        }
    }
}

fn default_llm_endpoint() -> String {
    gaine_llm::ollama::DEFAULT_ENDPOINT.to_string()
}

fn default_llm_model() -> String {
    "qwen2.5:7b-instruct".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    gaine_llm::ollama::DEFAULT_TIMEOUT_SECS
}

fn default_transcription_endpoint() -> String {
    gaine_gate::DEFAULT_ENDPOINT.to_string()
}

fn default_transcription_model() -> String {
    gaine_gate::DEFAULT_MODEL.to_string()
}

fn default_language() -> String {
    "fr".to_string()
}

impl AppConfig {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".gaine").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path falls back to defaults
    /// when missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and parse one TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_USE_LLM) {
            self.extractor.use_llm = is_truthy(&value);
        }
        if let Some(key) = lookup(ENV_TRANSCRIBE_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.transcription.api_key = Some(key);
        }
        if let Some(endpoint) = lookup(ENV_LLM_ENDPOINT).filter(|e| !e.trim().is_empty()) {
            self.llm.endpoint = endpoint;
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate()?;
        self.gate.validate()?;
        if self.llm.model.trim().is_empty() {
            return Err(CliError::Config("llm.model cannot be empty".to_string()));
        }
        if self.transcription.model.trim().is_empty() {
            return Err(CliError::Config("transcription.model cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Render as TOML, API key masked.
    pub fn to_toml_redacted(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.transcription.api_key.is_some() {
            shown.transcription.api_key = Some("***".to_string());
        }
        toml::to_string_pretty(&shown)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.extractor.use_llm);
        assert_eq!(config.gate.min_interval_ms, 1_200);
        assert_eq!(config.transcription.language, "fr");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_use_llm_flag_values() {
        for value in ["1", "true", "YES", " on "] {
            let mut config = AppConfig::default();
            config.apply_overrides(env(&[(ENV_USE_LLM, value)]));
            assert!(config.extractor.use_llm, "{}", value);
        }
        for value in ["0", "false", "off", ""] {
            let mut config = AppConfig {
                extractor: ExtractorConfig::with_llm(),
                ..Default::default()
            };
            config.apply_overrides(env(&[(ENV_USE_LLM, value)]));
            assert!(!config.extractor.use_llm, "{}", value);
        }
    }

    #[test]
    fn test_unset_variables_keep_file_values() {
        let mut config = AppConfig::default();
        config.llm.endpoint = "http://gpu-box:11434".to_string();
        config.apply_overrides(env(&[]));
        assert_eq!(config.llm.endpoint, "http://gpu-box:11434");
        assert!(config.transcription.api_key.is_none());
    }

    #[test]
    fn test_endpoint_and_key_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            (ENV_LLM_ENDPOINT, "http://other:11434"),
            (ENV_TRANSCRIBE_API_KEY, "sk-123"),
        ]));
        assert_eq!(config.llm.endpoint, "http://other:11434");
        assert_eq!(config.transcription.api_key.as_deref(), Some("sk-123"));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gate]\nmin_interval_ms = 3000\n\n[extractor]\nuse_llm = true").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.gate.min_interval_ms, 3_000);
        assert_eq!(config.gate.max_retries, 3);
        assert!(config.extractor.use_llm);
        assert_eq!(config.llm, LlmSettings::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_invalid_section_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gate]\nbackoff_base_ms = 0").unwrap();
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_redacted_output_hides_key() {
        let mut config = AppConfig::default();
        config.transcription.api_key = Some("sk-secret".to_string());
        let rendered = config.to_toml_redacted().unwrap();
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("***"));
        assert!(rendered.contains("[gate]"));
    }
}
