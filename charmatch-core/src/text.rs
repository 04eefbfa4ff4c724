//! Text operations driven by a matcher
//!
//! All operations work on slices of UTF-16 code units and are linear in the
//! input length. Absent matches are reported as `None` rather than a
//! sentinel index. Operations that may leave the input untouched return a
//! [`Cow`] so the caller gets the original slice back without a copy.

use std::borrow::Cow;

use crate::matcher::{CharMatcher, Kind};

impl CharMatcher {
    /// Whether every unit of `sequence` matches (true for an empty sequence)
    pub fn matches_all_of(&self, sequence: &[u16]) -> bool {
        match self.kind() {
            Kind::Any => true,
            Kind::None => sequence.is_empty(),
            Kind::Negated(original) => original.matches_none_of(sequence),
            _ => sequence.iter().rev().all(|&unit| self.matches(unit)),
        }
    }

    /// Whether no unit of `sequence` matches (true for an empty sequence)
    pub fn matches_none_of(&self, sequence: &[u16]) -> bool {
        match self.kind() {
            Kind::Any => sequence.is_empty(),
            Kind::None => true,
            Kind::Negated(original) => original.matches_all_of(sequence),
            _ => self.index_in(sequence).is_none(),
        }
    }

    /// Whether at least one unit of `sequence` matches
    pub fn matches_any_of(&self, sequence: &[u16]) -> bool {
        !self.matches_none_of(sequence)
    }

    /// Index of the first matching unit
    pub fn index_in(&self, sequence: &[u16]) -> Option<usize> {
        match self.kind() {
            Kind::Any => (!sequence.is_empty()).then_some(0),
            Kind::None => None,
            Kind::Is(expected) => sequence.iter().position(|unit| unit == expected),
            _ => sequence.iter().position(|&unit| self.matches(unit)),
        }
    }

    /// Index of the last matching unit
    pub fn last_index_in(&self, sequence: &[u16]) -> Option<usize> {
        match self.kind() {
            Kind::Any => sequence.len().checked_sub(1),
            Kind::None => None,
            Kind::Is(expected) => sequence.iter().rposition(|unit| unit == expected),
            _ => sequence.iter().rposition(|&unit| self.matches(unit)),
        }
    }

    /// Number of matching units
    pub fn count_in(&self, sequence: &[u16]) -> usize {
        match self.kind() {
            Kind::Any => sequence.len(),
            Kind::None => 0,
            Kind::Negated(original) => sequence.len() - original.count_in(sequence),
            _ => sequence.iter().filter(|&&unit| self.matches(unit)).count(),
        }
    }

    /// Copy of `sequence` without its matching units
    ///
    /// After the first match, a single forward pass compacts the working copy
    /// in place: `spread` counts the units dropped so far and every kept unit
    /// moves back by that many slots. Scattered matches cost nothing extra.
    pub fn remove_from(&self, sequence: &[u16]) -> Vec<u16> {
        match self.kind() {
            Kind::Any => return Vec::new(),
            Kind::None => return sequence.to_vec(),
            _ => {}
        }
        let Some(first) = self.index_in(sequence) else {
            return sequence.to_vec();
        };

        let mut units = sequence.to_vec();
        let mut spread = 1;
        for pos in first + 1..units.len() {
            let unit = units[pos];
            if self.matches(unit) {
                spread += 1;
            } else {
                units[pos - spread] = unit;
            }
        }
        units.truncate(units.len() - spread);
        units
    }

    /// Copy of `sequence` keeping only its matching units
    pub fn retain_from(&self, sequence: &[u16]) -> Vec<u16> {
        self.negate().remove_from(sequence)
    }

    /// `sequence` with every matching unit replaced by `replacement`
    ///
    /// Borrows the input when nothing matches.
    pub fn replace_from<'a>(&self, sequence: &'a [u16], replacement: u16) -> Cow<'a, [u16]> {
        if let Kind::Any = self.kind() {
            return Cow::Owned(vec![replacement; sequence.len()]);
        }
        let Some(first) = self.index_in(sequence) else {
            return Cow::Borrowed(sequence);
        };

        let mut units = sequence.to_vec();
        units[first] = replacement;
        for unit in &mut units[first + 1..] {
            if self.matches(*unit) {
                *unit = replacement;
            }
        }
        Cow::Owned(units)
    }

    /// `sequence` without its longest matching prefix and suffix
    ///
    /// Matching units in the interior are left alone.
    pub fn trim_from<'a>(&self, sequence: &'a [u16]) -> &'a [u16] {
        let Some(first) = sequence.iter().position(|&unit| !self.matches(unit)) else {
            return &sequence[..0];
        };
        // `first` does not match, so a non-matching unit exists at or after it
        let last = sequence
            .iter()
            .rposition(|&unit| !self.matches(unit))
            .unwrap_or(first);
        &sequence[first..=last]
    }

    /// `sequence` with each maximal run of matching units replaced by one
    /// `replacement`
    ///
    /// Borrows the input when nothing matches.
    pub fn collapse_from<'a>(&self, sequence: &'a [u16], replacement: u16) -> Cow<'a, [u16]> {
        let Some(first) = self.index_in(sequence) else {
            return Cow::Borrowed(sequence);
        };

        let mut units = Vec::with_capacity(sequence.len());
        units.extend_from_slice(&sequence[..first]);
        units.push(replacement);
        let mut in_run = true;
        for &unit in &sequence[first + 1..] {
            if self.matches(unit) {
                if !in_run {
                    units.push(replacement);
                    in_run = true;
                }
            } else {
                units.push(unit);
                in_run = false;
            }
        }
        Cow::Owned(units)
    }

    /// Like [`CharMatcher::collapse_from`], but runs at either end of the
    /// sequence are dropped instead of replaced
    ///
    /// An all-matching sequence collapses to nothing.
    pub fn trim_and_collapse_from(&self, sequence: &[u16], replacement: u16) -> Vec<u16> {
        let Some(first) = sequence.iter().position(|&unit| !self.matches(unit)) else {
            return Vec::new();
        };

        let mut units = Vec::with_capacity(sequence.len() - first);
        let mut in_run = false;
        for &unit in &sequence[first..] {
            if self.matches(unit) {
                in_run = true;
            } else {
                if in_run {
                    units.push(replacement);
                    in_run = false;
                }
                units.push(unit);
            }
        }
        units
    }
}
