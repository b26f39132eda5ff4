//! Gaine CLI - Voice inventory questions to structured queries.

use clap::Parser;
use gaine_cli::commands;
use gaine_cli::{AppConfig, Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> gaine_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config, then let the environment override it
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_env();

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config).await?,
        Command::Transcribe(args) => commands::execute_transcribe(args, &config).await?,
        Command::Ask(args) => commands::execute_ask(args, &config).await?,
        Command::Config => commands::execute_config(&config)?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
