//! Named text operations
//!
//! Lets callers pick a text operation at runtime (for instance from a
//! command line flag) and get a uniform, serialisable result back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{MatchError, Result};
use crate::matcher::CharMatcher;

/// A text operation selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Every unit matches
    All,
    /// No unit matches
    None,
    /// Some unit matches
    Any,
    /// Index of the first match
    Index,
    /// Index of the last match
    LastIndex,
    /// Number of matches
    Count,
    /// Drop matching units
    Remove,
    /// Keep only matching units
    Retain,
    /// Replace each match
    Replace,
    /// Strip matches from both ends
    Trim,
    /// Replace each run of matches with one character
    Collapse,
    /// Collapse inner runs and drop runs at the ends
    TrimCollapse,
}

/// Result of applying an [`Operation`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// Answer of a yes/no query
    Bool(bool),
    /// Code unit index, absent when nothing matched
    Index(Option<usize>),
    /// Number of matching units
    Count(usize),
    /// Transformed text
    Text(String),
}

impl Operation {
    /// Every operation, in listing order
    pub const ALL: [Operation; 12] = [
        Operation::All,
        Operation::None,
        Operation::Any,
        Operation::Index,
        Operation::LastIndex,
        Operation::Count,
        Operation::Remove,
        Operation::Retain,
        Operation::Replace,
        Operation::Trim,
        Operation::Collapse,
        Operation::TrimCollapse,
    ];

    /// Name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Operation::All => "all",
            Operation::None => "none",
            Operation::Any => "any",
            Operation::Index => "index",
            Operation::LastIndex => "last-index",
            Operation::Count => "count",
            Operation::Remove => "remove",
            Operation::Retain => "retain",
            Operation::Replace => "replace",
            Operation::Trim => "trim",
            Operation::Collapse => "collapse",
            Operation::TrimCollapse => "trim-collapse",
        }
    }

    /// Whether the operation needs a replacement character
    pub fn needs_replacement(self) -> bool {
        matches!(
            self,
            Operation::Replace | Operation::Collapse | Operation::TrimCollapse
        )
    }

    /// Run the operation over `text`
    ///
    /// `replacement` is required by [`Operation::needs_replacement`]
    /// operations and ignored by the others.
    pub fn apply(
        self,
        matcher: &CharMatcher,
        text: &str,
        replacement: Option<char>,
    ) -> Result<Outcome> {
        trace!(operation = self.name(), %matcher, len = text.len(), "applying operation");
        let require_replacement =
            || replacement.ok_or(MatchError::MissingReplacement(self.name()));

        let outcome = match self {
            Operation::All => Outcome::Bool(matcher.matches_all_of_str(text)),
            Operation::None => Outcome::Bool(matcher.matches_none_of_str(text)),
            Operation::Any => Outcome::Bool(!matcher.matches_none_of_str(text)),
            Operation::Index => Outcome::Index(matcher.index_in_str(text)),
            Operation::LastIndex => Outcome::Index(matcher.last_index_in_str(text)),
            Operation::Count => Outcome::Count(matcher.count_in_str(text)),
            Operation::Remove => Outcome::Text(matcher.remove_from_str(text)?),
            Operation::Retain => Outcome::Text(matcher.retain_from_str(text)?),
            Operation::Replace => {
                Outcome::Text(matcher.replace_from_str(text, require_replacement()?)?)
            }
            Operation::Trim => Outcome::Text(matcher.trim_from_str(text)?),
            Operation::Collapse => {
                Outcome::Text(matcher.collapse_from_str(text, require_replacement()?)?)
            }
            Operation::TrimCollapse => {
                Outcome::Text(matcher.trim_and_collapse_from_str(text, require_replacement()?)?)
            }
        };
        Ok(outcome)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| MatchError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Bool(value) => write!(f, "{value}"),
            Outcome::Index(Some(index)) => write!(f, "{index}"),
            Outcome::Index(None) => f.write_str("-1"),
            Outcome::Count(count) => write!(f, "{count}"),
            Outcome::Text(text) => f.write_str(text),
        }
    }
}
