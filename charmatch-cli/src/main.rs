//! charmatch command-line entry point

use anyhow::Result;
use charmatch_cli::commands::Commands;
use clap::Parser;

/// Match, count and rewrite text with composable character matchers
#[derive(Debug, Parser)]
#[command(name = "charmatch", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    Cli::parse().command.execute()
}
