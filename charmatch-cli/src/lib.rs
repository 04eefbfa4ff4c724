//! charmatch CLI library
//!
//! This library provides the command-line interface for running charmatch
//! matchers and text operations over files or standard input.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
