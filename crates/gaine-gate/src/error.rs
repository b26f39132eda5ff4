//! Error types for the transcription gate

use thiserror::Error;

/// Errors raised while setting up the gate
///
/// Transcription itself never errors out of the gate; failures become an
/// empty transcript.
#[derive(Error, Debug)]
pub enum GateError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client could not be built
    #[error("Client error: {0}")]
    Client(String),
}
