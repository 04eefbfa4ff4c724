//! UTF-8 string facade over the code unit operations
//!
//! Rust strings are UTF-8; matchers see UTF-16 code units. These helpers
//! encode once, run the slice operation and decode the result. Removing or
//! replacing one half of a surrogate pair leaves an unpaired surrogate, which
//! is reported as [`MatchError::InvalidUtf16`] rather than silently replaced.

use crate::error::{MatchError, Result};
use crate::matcher::{single_unit, CharMatcher};

/// Encode a string as UTF-16 code units
pub fn encode(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decode UTF-16 code units, rejecting unpaired surrogates
pub fn decode(units: &[u16]) -> Result<String> {
    let mut decoded = String::with_capacity(units.len());
    let mut position = 0;
    for result in char::decode_utf16(units.iter().copied()) {
        match result {
            Ok(ch) => {
                decoded.push(ch);
                position += ch.len_utf16();
            }
            Err(_) => return Err(MatchError::InvalidUtf16 { position }),
        }
    }
    Ok(decoded)
}

impl CharMatcher {
    /// [`CharMatcher::matches_all_of`] over a string
    pub fn matches_all_of_str(&self, text: &str) -> bool {
        text.encode_utf16().all(|unit| self.matches(unit))
    }

    /// [`CharMatcher::matches_none_of`] over a string
    pub fn matches_none_of_str(&self, text: &str) -> bool {
        !text.encode_utf16().any(|unit| self.matches(unit))
    }

    /// [`CharMatcher::index_in`] over a string, as a code unit index
    pub fn index_in_str(&self, text: &str) -> Option<usize> {
        self.index_in(&encode(text))
    }

    /// [`CharMatcher::last_index_in`] over a string, as a code unit index
    pub fn last_index_in_str(&self, text: &str) -> Option<usize> {
        self.last_index_in(&encode(text))
    }

    /// [`CharMatcher::count_in`] over a string
    pub fn count_in_str(&self, text: &str) -> usize {
        self.count_in(&encode(text))
    }

    /// [`CharMatcher::remove_from`] over a string
    pub fn remove_from_str(&self, text: &str) -> Result<String> {
        decode(&self.remove_from(&encode(text)))
    }

    /// [`CharMatcher::retain_from`] over a string
    pub fn retain_from_str(&self, text: &str) -> Result<String> {
        decode(&self.retain_from(&encode(text)))
    }

    /// [`CharMatcher::replace_from`] over a string
    ///
    /// `replacement` must fit in one code unit.
    pub fn replace_from_str(&self, text: &str, replacement: char) -> Result<String> {
        let replacement = single_unit(replacement)?;
        decode(&self.replace_from(&encode(text), replacement))
    }

    /// [`CharMatcher::trim_from`] over a string
    pub fn trim_from_str(&self, text: &str) -> Result<String> {
        decode(self.trim_from(&encode(text)))
    }

    /// [`CharMatcher::collapse_from`] over a string
    pub fn collapse_from_str(&self, text: &str, replacement: char) -> Result<String> {
        let replacement = single_unit(replacement)?;
        decode(&self.collapse_from(&encode(text), replacement))
    }

    /// [`CharMatcher::trim_and_collapse_from`] over a string
    pub fn trim_and_collapse_from_str(&self, text: &str, replacement: char) -> Result<String> {
        let replacement = single_unit(replacement)?;
        decode(&self.trim_and_collapse_from(&encode(text), replacement))
    }
}
