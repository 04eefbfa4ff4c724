//! Generate config command implementation

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

use crate::error::CliResult;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

/// Commented template accepted by `validate`
const TEMPLATE: &str = r#"# charmatch configuration

# Values used when the matching `run` flag is absent
[defaults]
# Matcher expression; may use the aliases below
matcher = "separators"
# Replacement character for replace, collapse and trim-collapse
replacement = " "
# Output format: "text" or "json"
format = "text"

# Named matcher expressions
#
# Expressions combine builtin names (see `charmatch list matchers`) with
#   is:C            a single character
#   any-of:CHARS    any listed character
#   none-of:CHARS   any character not listed
#   range:A-Z       an inclusive range
# using `!` (not), `&` (and), `|` (or) and parentheses. A backslash escapes
# the next character; \s is a space and \u{XXXX} names a code unit.
# Aliases may refer to builtin names but not to each other.
[matchers]
separators = "whitespace | any-of:,;"
vowels = "any-of:aeiouAEIOU"
consonants = "letter & ascii & !any-of:aeiouAEIOU"
"#;

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> CliResult<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the aliases and defaults");
        println!("2. Validate your configuration:");
        println!("   charmatch validate -c {}", self.output.display());
        println!("3. Use it for processing:");
        println!(
            "   charmatch run -o trim-collapse -i input.txt -c {}",
            self.output.display()
        );

        Ok(())
    }

    /// Template configuration content
    pub fn template() -> &'static str {
        TEMPLATE
    }
}
