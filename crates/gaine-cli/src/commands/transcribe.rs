//! Transcribe command implementation.

use crate::cli::TranscribeArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::messages::TRANSCRIPTION_UNAVAILABLE;
use gaine_gate::RateGate;
use std::sync::Arc;

use super::{build_transcriber, read_clip};

/// Execute the transcribe command.
pub async fn execute_transcribe(args: TranscribeArgs, config: &AppConfig) -> Result<()> {
    let clip = read_clip(&args.file, args.mime.as_deref())?;
    let gate = Arc::new(RateGate::new(config.gate.min_interval()));
    let transcriber = build_transcriber(config, gate)?;

    let transcript = transcriber.transcribe(&clip).await;
    if transcript.is_empty() {
        eprintln!("{}", TRANSCRIPTION_UNAVAILABLE);
    } else {
        println!("{}", transcript.text());
    }
    Ok(())
}
