//! Core error types
//!
//! Matching itself never fails; every error here is raised at construction
//! time (building a matcher, parsing an expression) or at the UTF-8/UTF-16
//! boundary of the string facade.

use thiserror::Error;

/// Errors raised by matcher construction and the string facade
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// `in_range` was given an end below its start
    #[error("invalid range: end {end:#06x} is below start {start:#06x}")]
    InvalidRange {
        /// Inclusive start of the requested range
        start: u16,
        /// Inclusive end of the requested range
        end: u16,
    },

    /// A `char` outside the basic plane was used where one code unit is required
    #[error("character {0:?} does not fit in a single UTF-16 code unit")]
    NotSingleUnit(char),

    /// A transformed sequence left an unpaired surrogate behind
    #[error("unpaired surrogate at code unit {position}")]
    InvalidUtf16 {
        /// Index of the offending code unit
        position: usize,
    },

    /// Malformed matcher expression
    #[error("invalid matcher expression at offset {position}: {reason}")]
    InvalidExpression {
        /// Byte offset into the expression
        position: usize,
        /// What the parser expected
        reason: String,
    },

    /// Name that is neither a builtin constant nor a known alias
    #[error("unknown matcher '{0}'")]
    UnknownMatcher(String),

    /// Operation name that the dispatcher does not know
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// Replacing operation invoked without a replacement character
    #[error("operation '{0}' requires a replacement character")]
    MissingReplacement(&'static str),
}

/// Result type for matcher operations
pub type Result<T> = std::result::Result<T, MatchError>;
