//! Output formatting module

use anyhow::Result;
use charmatch_core::{Operation, Outcome};
use serde::Serialize;

/// Result of one operation over one input source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Display name of the input (a path or `<stdin>`)
    pub source: String,
    /// Operation that produced the result
    pub operation: Operation,
    /// Operation result
    pub result: Outcome,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One result per line
    Text,
    /// JSON array of records with source and operation
    Json,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single record
    fn format_record(&mut self, record: &Record) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Build the formatter for `format` writing to `writer`
pub fn formatter<W>(format: OutputFormat, writer: W) -> Box<dyn OutputFormatter>
where
    W: std::io::Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
    }
}
