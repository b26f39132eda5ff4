//! Audio input and transcript output of the transcription boundary

/// Sample rate expected by the transcription service (mono)
pub const TRANSCRIPTION_SAMPLE_RATE: u32 = 16_000;

/// Audio already converted to the transcription format
///
/// Transcoding happens outside this crate; the clip only carries the bytes
/// and enough metadata for the transcription request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Encoded audio bytes
    pub data: Vec<u8>,

    /// MIME type of `data`, e.g. `audio/wav`
    pub mime: String,

    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioClip {
    /// Create a 16 kHz mono WAV clip
    pub fn wav(data: Vec<u8>) -> Self {
        Self {
            data,
            mime: "audio/wav".to_string(),
            sample_rate: TRANSCRIPTION_SAMPLE_RATE,
        }
    }

    /// Override the MIME type
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// Suggested file name for multipart uploads
    pub fn file_name(&self) -> &'static str {
        match self.mime.as_str() {
            "audio/ogg" | "audio/opus" => "audio.ogg",
            "audio/mpeg" | "audio/mp3" => "audio.mp3",
            "audio/flac" => "audio.flac",
            _ => "audio.wav",
        }
    }

    /// Whether the clip carries no audio
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Text produced by the transcription gate
///
/// An empty transcript means "transcription unavailable right now"; it is a
/// normal, recoverable outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    /// Wrap transcribed text, trimming surrounding whitespace
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
        }
    }

    /// The unavailable transcript
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Get the transcript text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether transcription produced nothing
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_clip_defaults() {
        let clip = AudioClip::wav(vec![1, 2, 3]);
        assert_eq!(clip.sample_rate, TRANSCRIPTION_SAMPLE_RATE);
        assert_eq!(clip.file_name(), "audio.wav");
        assert!(!clip.is_empty());
    }

    #[test]
    fn test_clip_file_name_follows_mime() {
        let clip = AudioClip::wav(Vec::new()).with_mime("audio/ogg");
        assert_eq!(clip.file_name(), "audio.ogg");
        assert!(clip.is_empty());
    }

    #[test]
    fn test_transcript_trims() {
        let transcript = Transcript::new("  les sorties de gsb11 \n");
        assert_eq!(transcript.text(), "les sorties de gsb11");
        assert!(Transcript::new("   ").is_empty());
        assert!(Transcript::unavailable().is_empty());
    }
}
