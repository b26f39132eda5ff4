//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Gaine - Turn spoken French inventory questions into structured queries.
#[derive(Debug, Parser)]
#[command(name = "gaine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "GAINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a structured query from a sentence
    Extract(ExtractArgs),

    /// Transcribe an audio file through the rate gate
    Transcribe(TranscribeArgs),

    /// Answer a question given as text or audio
    Ask(AskArgs),

    /// Print the effective configuration
    Config,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Sentence to analyse (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl ExtractArgs {
    /// The sentence as one string.
    pub fn sentence(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for the transcribe command.
#[derive(Debug, Args)]
pub struct TranscribeArgs {
    /// Audio file, already 16 kHz mono
    pub file: PathBuf,

    /// MIME type (guessed from the extension by default)
    #[arg(long)]
    pub mime: Option<String>,
}

/// Arguments for the ask command.
#[derive(Debug, Args)]
pub struct AskArgs {
    /// Question as text
    #[arg(short, long, conflicts_with = "audio", required_unless_present = "audio")]
    pub text: Option<String>,

    /// Question as an audio file, already 16 kHz mono
    #[arg(short, long)]
    pub audio: Option<PathBuf>,

    /// MIME type of the audio file
    #[arg(long, requires = "audio")]
    pub mime: Option<String>,

    /// Caller identifier passed to the router
    #[arg(long, default_value = "cli")]
    pub caller: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_joins_words() {
        let cli = Cli::try_parse_from(["gaine", "extract", "les", "sorties", "de", "gsb11"]).unwrap();
        match cli.command {
            Command::Extract(args) => assert_eq!(args.sentence(), "les sorties de gsb11"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_ask_requires_one_input() {
        assert!(Cli::try_parse_from(["gaine", "ask"]).is_err());
        assert!(Cli::try_parse_from(["gaine", "ask", "--text", "x", "--audio", "a.wav"]).is_err());

        let cli = Cli::try_parse_from(["gaine", "ask", "--audio", "a.wav", "--caller", "42"]).unwrap();
        match cli.command {
            Command::Ask(args) => {
                assert_eq!(args.caller, "42");
                assert!(args.text.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["gaine", "config", "-v", "--config", "/tmp/g.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.toml")));
    }
}
