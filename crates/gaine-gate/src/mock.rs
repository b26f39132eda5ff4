//! Scripted transcriber for tests and offline runs

use async_trait::async_trait;
use gaine_domain::{AudioClip, Transcriber, TranscriptionError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::time::Instant;

/// Mock transcriber replaying a script of results
///
/// Each call pops the next scripted result; once the script is exhausted the
/// default text is returned. Call times are recorded on the tokio clock so
/// pacing can be asserted under a paused runtime.
#[derive(Clone)]
pub struct MockTranscriber {
    script: Arc<Mutex<VecDeque<Result<String, TranscriptionError>>>>,
    default_text: String,
    call_count: Arc<AtomicUsize>,
    call_times: Arc<Mutex<Vec<Instant>>>,
}

impl MockTranscriber {
    /// Create a mock that always answers `default_text`
    pub fn new(default_text: impl Into<String>) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_text: default_text.into(),
            call_count: Arc::new(AtomicUsize::new(0)),
            call_times: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful transcription
    pub fn push_text(&self, text: impl Into<String>) {
        self.push(Ok(text.into()));
    }

    /// Queue a throttling error
    pub fn push_throttled(&self) {
        self.push(Err(TranscriptionError::Throttled("429 Too Many Requests".to_string())));
    }

    /// Queue a non-retryable failure
    pub fn push_failure(&self, message: impl Into<String>) {
        self.push(Err(TranscriptionError::Failed(message.into())));
    }

    /// Queue an arbitrary result
    pub fn push(&self, result: Result<String, TranscriptionError>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Instants at which calls reached the mock
    pub fn call_times(&self) -> Vec<Instant> {
        self.call_times
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new("")
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &AudioClip) -> Result<String, TranscriptionError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.call_times
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Instant::now());

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        next.unwrap_or_else(|| Ok(self.default_text.clone()))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_default() {
        let mock = MockTranscriber::new("défaut");
        mock.push_throttled();
        mock.push_text("les entrées de gl90");

        let clip = AudioClip::wav(vec![0; 4]);
        assert!(matches!(mock.transcribe(&clip).await, Err(TranscriptionError::Throttled(_))));
        assert_eq!(mock.transcribe(&clip).await.unwrap(), "les entrées de gl90");
        assert_eq!(mock.transcribe(&clip).await.unwrap(), "défaut");
        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.call_times().len(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let mock = MockTranscriber::default();
        let clone = mock.clone();
        clone.push_failure("boom");

        let clip = AudioClip::wav(Vec::new());
        assert!(matches!(mock.transcribe(&clip).await, Err(TranscriptionError::Failed(_))));
        assert_eq!(clone.call_count(), 1);
    }
}
