//! Gaine CLI library.
//!
//! Wires the transcription gate, the extraction orchestrator and the
//! downstream router into the `gaine` command-line tool.

pub mod assistant;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod messages;
pub mod router;

pub use assistant::Assistant;
pub use cli::{Cli, Command};
pub use config::{AppConfig, LlmSettings, TranscriptionSettings};
pub use error::{CliError, Result};
pub use router::JsonEchoRouter;
