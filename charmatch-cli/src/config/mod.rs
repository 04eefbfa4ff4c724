//! Configuration module
//!
//! A config file supplies defaults for `run` and named matcher aliases:
//!
//! ```toml
//! [defaults]
//! matcher = "vowels | digit"
//! replacement = "_"
//! format = "json"
//!
//! [matchers]
//! vowels = "any-of:aeiouAEIOU"
//! ```

use anyhow::{Context, Result};
use charmatch_core::{constants, expr, CharMatcher};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::CliError;
use crate::output::OutputFormat;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Defaults for `run` flags
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Alias name to matcher expression
    #[serde(default)]
    pub matchers: BTreeMap<String, String>,
}

/// Values used when the matching flag is absent
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Matcher expression, may use aliases
    pub matcher: Option<String>,

    /// Replacement character for replace and collapse operations
    pub replacement: Option<char>,

    /// Output format name
    pub format: Option<String>,
}

impl CliConfig {
    /// Load and deserialize a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(e.message().to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Compile every alias
    ///
    /// Aliases may refer to builtin names but not to each other, and may not
    /// reuse a builtin name.
    pub fn compile_matchers(&self) -> Result<HashMap<String, CharMatcher>> {
        let mut compiled = HashMap::with_capacity(self.matchers.len());
        for (name, expression) in &self.matchers {
            if constants::by_name(name).is_some() {
                return Err(CliError::ConfigError(format!(
                    "alias '{name}' shadows a builtin matcher"
                ))
                .into());
            }
            if name.is_empty()
                || !name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(CliError::ConfigError(format!("invalid alias name '{name}'")).into());
            }
            let matcher = expr::parse(expression)
                .map_err(|e| CliError::InvalidMatcher(format!("alias '{name}': {e}")))?;
            log::debug!("compiled alias {name} = {matcher}");
            compiled.insert(name.clone(), matcher);
        }
        Ok(compiled)
    }

    /// Default output format, if one is configured
    pub fn default_format(&self) -> Result<Option<OutputFormat>> {
        self.defaults
            .format
            .as_deref()
            .map(|name| {
                OutputFormat::from_str(name, true).map_err(|_| {
                    anyhow::Error::from(CliError::ConfigError(format!("unknown format '{name}'")))
                })
            })
            .transpose()
    }

    /// Check everything a `run` would compile from this config
    pub fn validate(&self) -> Result<HashMap<String, CharMatcher>> {
        let aliases = self.compile_matchers()?;
        if let Some(expression) = &self.defaults.matcher {
            expr::parse_with_aliases(expression, &aliases)
                .map_err(|e| CliError::InvalidMatcher(format!("default matcher: {e}")))?;
        }
        if let Some(replacement) = self.defaults.replacement {
            if replacement.len_utf16() != 1 {
                return Err(CliError::ConfigError(format!(
                    "replacement {replacement:?} does not fit in one code unit"
                ))
                .into());
            }
        }
        self.default_format()?;
        Ok(aliases)
    }
}
