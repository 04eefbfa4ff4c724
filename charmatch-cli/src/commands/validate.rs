//! Validate command implementation

use clap::Args;
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        println!("Validating configuration: {}", self.config.display());

        match CliConfig::from_file(&self.config).and_then(|config| {
            let aliases = config.validate()?;
            Ok((config, aliases))
        }) {
            Ok((config, aliases)) => {
                println!("✓ Configuration is valid!");
                println!("  Aliases: {}", aliases.len());
                for (name, expression) in &config.matchers {
                    println!("    {name} = {expression}");
                }
                if let Some(matcher) = &config.defaults.matcher {
                    println!("  Default matcher: {matcher}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {e:#}"))
            }
        }
    }
}
