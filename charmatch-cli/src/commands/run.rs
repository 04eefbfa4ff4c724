//! Run command implementation

use anyhow::{Context, Result};
use charmatch_core::{expr, CharMatcher, Operation};
use clap::Args;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::input::{resolve_patterns, InputSource};
use crate::output::{self, OutputFormat, Record};
use crate::progress::ProgressReporter;

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Matcher expression, e.g. "whitespace" or "any-of:,; | digit"
    #[arg(short, long, value_name = "EXPR")]
    pub matcher: Option<String>,

    /// Operation to apply
    #[arg(short = 'o', long, value_name = "OP")]
    pub operation: Operation,

    /// Replacement character for replace, collapse and trim-collapse
    #[arg(short, long, value_name = "CHAR")]
    pub replacement: Option<char>,

    /// Input files or patterns (supports glob); standard input when absent
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Process input files in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl RunArgs {
    /// Execute the run command
    pub fn execute(&self) -> CliResult<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting run");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let format = match self.format {
            Some(format) => format,
            None => config.default_format()?.unwrap_or(OutputFormat::Text),
        };
        let replacement = self.replacement.or(config.defaults.replacement);

        let sources = self.sources()?;
        let matcher = self.build_matcher(&config, sources.len())?;
        log::info!(
            "Applying {} with {} to {} input(s)",
            self.operation,
            matcher,
            sources.len()
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_inputs(sources.len() as u64);

        let process = |source: &InputSource| -> Result<Record> {
            let text = source.read()?;
            let result = self
                .operation
                .apply(&matcher, &text, replacement)
                .with_context(|| format!("Failed to process {source}"))?;
            progress.input_completed(&source.to_string());
            Ok(Record {
                source: source.to_string(),
                operation: self.operation,
                result,
            })
        };

        let records = if self.parallel && sources.len() > 1 {
            log::debug!("Processing {} inputs in parallel", sources.len());
            sources.par_iter().map(process).collect::<Result<Vec<_>>>()
        } else {
            sources.iter().map(process).collect::<Result<Vec<_>>>()
        };
        progress.finish();
        let records = records?;

        let mut formatter = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output: {}", path.display()))?;
                output::formatter(format, BufWriter::new(file))
            }
            None => output::formatter(format, io::stdout()),
        };
        for record in &records {
            formatter.format_record(record)?;
        }
        formatter.finish()?;

        log::info!("Finished {} input(s)", records.len());
        Ok(())
    }

    /// Inputs named on the command line, or standard input
    fn sources(&self) -> Result<Vec<InputSource>> {
        if self.input.is_empty() {
            return Ok(vec![InputSource::Stdin]);
        }
        Ok(resolve_patterns(&self.input)?
            .into_iter()
            .map(InputSource::File)
            .collect())
    }

    /// Compile the matcher expression against the config aliases
    ///
    /// Matchers used on several inputs are precomputed once up front.
    fn build_matcher(&self, config: &CliConfig, inputs: usize) -> Result<CharMatcher> {
        let expression = self
            .matcher
            .as_deref()
            .or(config.defaults.matcher.as_deref())
            .ok_or(CliError::MissingValue("matcher"))?;
        let aliases = config.compile_matchers()?;
        let matcher = expr::parse_with_aliases(expression, &aliases)
            .map_err(|e| CliError::InvalidMatcher(format!("{expression}: {e}")))?;

        if inputs > 1 {
            Ok(matcher.precomputed())
        } else {
            Ok(matcher)
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when run from tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}
