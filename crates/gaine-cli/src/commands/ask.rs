//! Ask command implementation.

use crate::assistant::Assistant;
use crate::cli::AskArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::router::JsonEchoRouter;
use gaine_gate::RateGate;
use std::sync::Arc;

use super::{build_orchestrator, build_transcriber, read_clip};

/// Execute the ask command.
pub async fn execute_ask(args: AskArgs, config: &AppConfig) -> Result<()> {
    let gate = Arc::new(RateGate::new(config.gate.min_interval()));
    let assistant = Assistant::new(
        build_transcriber(config, gate)?,
        build_orchestrator(config)?,
        JsonEchoRouter,
    );

    let reply = match (args.text, args.audio) {
        (Some(text), _) => assistant.handle_text(&args.caller, &text).await?,
        (None, Some(path)) => {
            let clip = read_clip(&path, args.mime.as_deref())?;
            assistant.handle_audio(&args.caller, &clip).await?
        }
        (None, None) => {
            return Err(CliError::InvalidInput("either --text or --audio is required".to_string()));
        }
    };

    println!("{}", reply);
    Ok(())
}
