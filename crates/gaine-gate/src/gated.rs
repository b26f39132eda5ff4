//! Transcription client behind the rate gate

use crate::backoff::{Backoff, RetryDecision, RetryState};
use crate::config::GateConfig;
use crate::rate_gate::RateGate;
use gaine_domain::{AudioClip, Transcriber, Transcript, TranscriptionError};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Wraps a [`Transcriber`] with pacing and throttle-only retries
///
/// Every attempt, first call and retries alike, takes a fresh slot from the
/// shared [`RateGate`]. Only [`TranscriptionError::Throttled`] is retried;
/// any other failure, or running out of retries, yields an empty
/// [`Transcript`].
///
/// # Examples
///
/// ```
/// use gaine_domain::AudioClip;
/// use gaine_gate::{GateConfig, GatedTranscriber, MockTranscriber, RateGate};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let config = GateConfig::default();
/// let gate = Arc::new(RateGate::new(config.min_interval()));
/// let transcriber = GatedTranscriber::new(MockTranscriber::new("les stock de gl90"), gate, &config);
///
/// let transcript = transcriber.transcribe(&AudioClip::wav(vec![0; 16])).await;
/// assert_eq!(transcript.text(), "les stock de gl90");
/// # }
/// ```
pub struct GatedTranscriber<T: Transcriber> {
    inner: T,
    gate: Arc<RateGate>,
    backoff: Backoff,
    max_retries: u32,
}

impl<T: Transcriber> GatedTranscriber<T> {
    /// Wrap `inner`, sharing `gate` with every other client of the service
    pub fn new(inner: T, gate: Arc<RateGate>, config: &GateConfig) -> Self {
        Self {
            inner,
            gate,
            backoff: Backoff::from_config(config),
            max_retries: config.max_retries,
        }
    }

    /// Transcribe a clip; empty transcript when the service is unavailable
    pub async fn transcribe(&self, audio: &AudioClip) -> Transcript {
        let mut retry = RetryState::new(self.max_retries);

        loop {
            let slot = self.gate.acquire().await;
            debug!(
                "Transcription attempt {} granted at {:?} ({})",
                retry.retries_used() + 1,
                slot.granted_at(),
                self.inner.model_name()
            );

            match self.inner.transcribe(audio).await {
                Ok(text) => {
                    let transcript = Transcript::new(text);
                    info!("Transcribed {} chars", transcript.text().len());
                    return transcript;
                }
                Err(TranscriptionError::Throttled(message)) => match retry.on_throttle() {
                    RetryDecision::Retry { attempt } => {
                        let delay = self.backoff.delay_with_jitter(attempt);
                        warn!("Transcription throttled ({}), retrying in {:?}", message, delay);
                        sleep(delay).await;
                    }
                    RetryDecision::GiveUp => {
                        warn!(
                            "Transcription still throttled after {} retries, giving up",
                            retry.retries_used()
                        );
                        return Transcript::unavailable();
                    }
                },
                Err(error) => {
                    retry.on_failure();
                    warn!("Transcription failed: {}", error);
                    return Transcript::unavailable();
                }
            }
        }
    }
}
