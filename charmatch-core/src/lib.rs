//! Composable predicates over UTF-16 code units
//!
//! A [`CharMatcher`] decides membership for each of the 65,536 code units.
//! Matchers are immutable and cheap to clone, so they can be freely shared
//! between threads. On top of the predicate sit two layers:
//!
//! - **Combinators**: [`CharMatcher::negate`], [`CharMatcher::and`],
//!   [`CharMatcher::or`] and [`CharMatcher::precomputed`], which flattens any
//!   matcher into a 65,536-bit [`LookupTable`].
//! - **Text operations**: searching, counting and rewriting code unit
//!   sequences (`&[u16]`), with `_str` counterparts for UTF-8 strings.
//!
//! Named constants such as [`constants::whitespace`] and [`constants::digit`]
//! are built lazily, once per process.
//!
//! # Example
//!
//! ```rust
//! use charmatch_core::{constants, CharMatcher};
//!
//! let ws = constants::whitespace();
//! assert_eq!(ws.trim_and_collapse_from_str("  hello \t world  ", ' ').unwrap(), "hello world");
//!
//! let vowels = CharMatcher::any_of_str("aeiou");
//! assert_eq!(vowels.count_in_str("education"), 5);
//!
//! let parsed: CharMatcher = "range:a-z & !any-of:aeiou".parse().unwrap();
//! assert_eq!(parsed.remove_from_str("consonant").unwrap(), "ooa");
//! ```

pub mod constants;
pub mod error;
pub mod expr;
mod matcher;
pub mod operation;
pub mod table;
mod text;
pub mod utf16;

pub use error::{MatchError, Result};
pub use expr::{parse, parse_with_aliases};
pub use matcher::CharMatcher;
pub use operation::{Operation, Outcome};
pub use table::LookupTable;
