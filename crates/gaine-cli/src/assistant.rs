//! Voice assistant pipeline: transcript, extraction, decision, reply.

use crate::error::{CliError, Result};
use crate::messages::{MISSING_GAINE_PROMPT, MISSING_INTENT_PROMPT, TRANSCRIPTION_UNAVAILABLE};
use gaine_domain::{AudioClip, QueryRouter, Transcriber};
use gaine_extractor::{Orchestrator, Outcome};
use gaine_gate::GatedTranscriber;
use tracing::info;

/// Turns one utterance into one reply.
///
/// Clarification prompts and the unavailable-transcription message are
/// decided here; the router only ever sees complete queries.
pub struct Assistant<T: Transcriber, R: QueryRouter> {
    transcriber: GatedTranscriber<T>,
    orchestrator: Orchestrator,
    router: R,
}

impl<T: Transcriber, R: QueryRouter> Assistant<T, R> {
    /// Create an assistant.
    pub fn new(transcriber: GatedTranscriber<T>, orchestrator: Orchestrator, router: R) -> Self {
        Self {
            transcriber,
            orchestrator,
            router,
        }
    }

    /// Reply to a spoken question.
    pub async fn handle_audio(&self, caller: &str, clip: &AudioClip) -> Result<String> {
        let transcript = self.transcriber.transcribe(clip).await;
        if transcript.is_empty() {
            info!(caller, "Transcription unavailable");
            return Ok(TRANSCRIPTION_UNAVAILABLE.to_string());
        }
        self.handle_text(caller, transcript.text()).await
    }

    /// Reply to a written (or already transcribed) question.
    pub async fn handle_text(&self, caller: &str, text: &str) -> Result<String> {
        let resolution = self.orchestrator.run(text).await;
        let outcome = Outcome::decide(resolution.query);
        info!(caller, source = %resolution.source, outcome = outcome.label(), "Utterance resolved");

        match outcome {
            Outcome::MissingIntent => Ok(MISSING_INTENT_PROMPT.to_string()),
            Outcome::MissingGaine => Ok(MISSING_GAINE_PROMPT.to_string()),
            Outcome::Ready(query) => self
                .router
                .route(&query, caller)
                .await
                .map_err(|e| CliError::Router(e.to_string())),
        }
    }
}
