//! Command implementations.

pub mod ask;
pub mod config;
pub mod extract;
pub mod transcribe;

pub use self::ask::execute_ask;
pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::transcribe::execute_transcribe;

use crate::config::AppConfig;
use crate::error::Result;
use gaine_domain::AudioClip;
use gaine_extractor::Orchestrator;
use gaine_gate::{GatedTranscriber, HttpTranscriber, RateGate};
use gaine_llm::OllamaProvider;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the extraction chain described by the configuration.
pub fn build_orchestrator(config: &AppConfig) -> Result<Orchestrator> {
    if !config.extractor.use_llm {
        return Ok(Orchestrator::new(config.extractor.clone()));
    }

    let provider = OllamaProvider::with_timeout(
        config.llm.endpoint.clone(),
        config.llm.model.clone(),
        Duration::from_secs(config.llm.timeout_secs),
    )?;
    info!("Model strategy enabled ({} at {})", config.llm.model, config.llm.endpoint);
    Ok(Orchestrator::with_model(config.extractor.clone(), provider))
}

/// Build the HTTP transcriber behind `gate`.
pub fn build_transcriber(config: &AppConfig, gate: Arc<RateGate>) -> Result<GatedTranscriber<HttpTranscriber>> {
    let settings = &config.transcription;
    let mut client = HttpTranscriber::new(settings.endpoint.clone(), settings.model.clone())?
        .with_language(settings.language.clone());
    if let Some(key) = &settings.api_key {
        client = client.with_api_key(key.clone());
    }
    Ok(GatedTranscriber::new(client, gate, &config.gate))
}

/// Read an audio file into a clip.
pub fn read_clip(path: &Path, mime: Option<&str>) -> Result<AudioClip> {
    let data = std::fs::read(path)?;
    let mime = mime.map(str::to_string).unwrap_or_else(|| guess_mime(path).to_string());
    Ok(AudioClip::wav(data).with_mime(mime))
}

/// MIME type from the file extension; WAV when unknown.
pub fn guess_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "ogg" | "opus" => "audio/ogg",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        _ => "audio/wav",
    }
}
