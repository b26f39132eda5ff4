//! HTTP transcription client
//!
//! Speaks the OpenAI-compatible `POST {endpoint}/audio/transcriptions`
//! multipart API. Quota responses are reported as
//! [`TranscriptionError::Throttled`] so the gate can back off.

use crate::error::GateError;
use async_trait::async_trait;
use gaine_domain::{AudioClip, Transcriber, TranscriptionError};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default transcription endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default transcription model
pub const DEFAULT_MODEL: &str = "whisper-1";

/// Default HTTP timeout for one transcription call (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Remote speech-to-text service
pub struct HttpTranscriber {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    language: Option<String>,
    client: reqwest::Client,
}

impl HttpTranscriber {
    /// Create a client for `endpoint` using `model`
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, GateError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit HTTP timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GateError::Client(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
            language: None,
            client,
        })
    }

    /// Authenticate with a bearer token
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Hint the spoken language (ISO 639-1, e.g. `fr`)
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn url(&self) -> String {
        format!("{}/audio/transcriptions", self.endpoint)
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: &AudioClip) -> Result<String, TranscriptionError> {
        let part = Part::bytes(audio.data.clone())
            .file_name(audio.file_name())
            .mime_str(&audio.mime)
            .map_err(|e| TranscriptionError::Failed(format!("Invalid MIME type: {}", e)))?;

        let mut form = Form::new().text("model", self.model.clone()).part("file", part);
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let mut request = self.client.post(self.url()).multipart(form);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscriptionError::Failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::Throttled(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::classify(format!("HTTP {}: {}", status, error_text)));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Failed(format!("Failed to parse response: {}", e)))?;

        debug!("Transcription returned {} chars", body.text.len());
        Ok(body.text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
