//! Config command implementation.

use crate::config::AppConfig;
use crate::error::Result;

/// Execute the config command.
pub fn execute_config(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml_redacted()?);
    Ok(())
}
