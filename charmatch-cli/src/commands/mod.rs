//! CLI command implementations

use charmatch_core::{constants, Operation};
use clap::{Subcommand, ValueEnum};

pub mod generate_config;
pub mod run;
pub mod validate;

use crate::error::CliResult;
use crate::output::OutputFormat;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply a text operation to files or standard input
    Run(run::RunArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List builtin matcher names
    Matchers,

    /// List text operations
    Operations,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Run(args) => args.execute(),
            Commands::List { subcommand } => {
                print!("{}", subcommand.render());
                Ok(())
            }
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

impl ListCommands {
    /// Listing text, one entry per line
    pub fn render(self) -> String {
        let mut listing = String::new();
        match self {
            ListCommands::Matchers => {
                for constant in constants::REGISTRY {
                    listing.push_str(&format!(
                        "{:<18} {}\n",
                        constant.name, constant.description
                    ));
                }
            }
            ListCommands::Operations => {
                for op in Operation::ALL {
                    let note = if op.needs_replacement() {
                        "(needs --replacement)"
                    } else {
                        ""
                    };
                    listing.push_str(format!("{:<14} {note}", op.name()).trim_end());
                    listing.push('\n');
                }
            }
            ListCommands::Formats => {
                for format in OutputFormat::value_variants() {
                    if let Some(value) = format.to_possible_value() {
                        listing.push_str(value.get_name());
                        listing.push('\n');
                    }
                }
            }
        }
        listing
    }
}
