//! Precomputed lookup table for O(1) matching
//!
//! One bit per possible 16-bit code unit: 65536 bits, 8 KiB. A table is
//! filled once while a matcher is being precomputed and is read-only after
//! that, so it can be shared freely between threads.

use std::fmt;

/// Number of distinct code units
pub const DOMAIN_SIZE: usize = 1 << 16;

const WORDS: usize = DOMAIN_SIZE / 64;

/// Bit vector indexed directly by code unit value
#[derive(Clone, PartialEq, Eq)]
pub struct LookupTable {
    words: Box<[u64; WORDS]>,
}

impl LookupTable {
    /// Create an empty table (no unit set)
    pub fn new() -> Self {
        Self {
            words: Box::new([0; WORDS]),
        }
    }

    /// Build a table by sweeping the whole domain through `predicate`
    ///
    /// This is the O(n) fallback used for matchers that cannot describe
    /// their members directly.
    pub fn from_fn(mut predicate: impl FnMut(u16) -> bool) -> Self {
        let mut table = Self::new();
        for unit in 0..=u16::MAX {
            if predicate(unit) {
                table.set(unit);
            }
        }
        table
    }

    /// Mark a single unit as matching
    #[inline]
    pub fn set(&mut self, unit: u16) {
        self.words[usize::from(unit >> 6)] |= 1u64 << (unit & 63);
    }

    /// Mark every unit in `start..=end` as matching
    pub fn set_range(&mut self, start: u16, end: u16) {
        for unit in start..=end {
            self.set(unit);
        }
    }

    /// OR another table into this one
    pub fn union_with(&mut self, other: &LookupTable) {
        for (word, theirs) in self.words.iter_mut().zip(other.words.iter()) {
            *word |= theirs;
        }
    }

    /// Check whether `unit` is set
    #[inline]
    pub fn get(&self, unit: u16) -> bool {
        self.words[usize::from(unit >> 6)] & (1u64 << (unit & 63)) != 0
    }

    /// Number of matching units
    pub fn cardinality(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupTable")
            .field("cardinality", &self.cardinality())
            .finish()
    }
}
