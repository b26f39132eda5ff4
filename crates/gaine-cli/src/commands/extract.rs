//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::AppConfig;
use crate::error::Result;
use gaine_extractor::{Outcome, Resolution};

use super::build_orchestrator;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &AppConfig) -> Result<()> {
    let orchestrator = build_orchestrator(config)?;
    let resolution = orchestrator.run(&args.sentence()).await;
    println!("{}", render(&resolution)?);
    Ok(())
}

/// JSON report: query, producing strategy, and outcome.
pub fn render(resolution: &Resolution) -> Result<String> {
    let outcome = Outcome::decide(resolution.query.clone());
    let report = serde_json::json!({
        "query": resolution.query,
        "source": resolution.source,
        "outcome": outcome.label(),
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaine_extractor::{ExtractorConfig, Orchestrator};

    #[tokio::test]
    async fn test_render_report() {
        let orchestrator = Orchestrator::new(ExtractorConfig::default());
        let resolution = orchestrator.run("stock gl90").await;

        let value: serde_json::Value = serde_json::from_str(&render(&resolution).unwrap()).unwrap();
        assert_eq!(value["source"], "fallback");
        assert_eq!(value["outcome"], "ready");
        assert_eq!(value["query"]["gaine"]["value"], "gl90");
    }

    #[tokio::test]
    async fn test_render_missing_gaine() {
        let orchestrator = Orchestrator::new(ExtractorConfig::default());
        let resolution = orchestrator.run("les sorties").await;

        let value: serde_json::Value = serde_json::from_str(&render(&resolution).unwrap()).unwrap();
        assert_eq!(value["outcome"], "missing_gaine");
        assert!(value["query"]["gaine"].is_null());
    }
}
