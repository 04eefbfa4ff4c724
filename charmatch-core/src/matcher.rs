//! The matcher type and its combinator algebra
//!
//! A [`CharMatcher`] is an immutable predicate over every 16-bit code unit.
//! Matchers are built from a closed set of variants (single unit, range,
//! explicit set, negation, conjunction, disjunction, precomputed table,
//! external predicate) and evaluated by a single dispatch in
//! [`CharMatcher::matches`]. Cloning is cheap: the variant tree is shared.
//!
//! Units outside the basic plane are never seen as a whole; a supplementary
//! character is two surrogate units and each is classified on its own.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::constants;
use crate::error::{MatchError, Result};
use crate::table::LookupTable;

/// Component list of a flattened conjunction or disjunction
pub(crate) type Components = SmallVec<[CharMatcher; 4]>;

/// Predicate supplied from outside the variant set
pub(crate) type PredicateFn = dyn Fn(u16) -> bool + Send + Sync;

/// Variant tree of a matcher
pub(crate) enum Kind {
    Any,
    None,
    Is(u16),
    IsNot(u16),
    AnyOfTwo(u16, u16),
    /// Sorted, duplicates kept
    AnyOf(Box<[u16]>),
    InRange(u16, u16),
    Negated(CharMatcher),
    And(Components),
    Or(Components),
    Table {
        table: LookupTable,
        label: Cow<'static, str>,
    },
    Predicate {
        name: Cow<'static, str>,
        predicate: Box<PredicateFn>,
    },
}

/// Immutable predicate over 16-bit code units
#[derive(Clone)]
pub struct CharMatcher {
    inner: Arc<Kind>,
}

impl CharMatcher {
    pub(crate) fn from_kind(kind: Kind) -> Self {
        Self {
            inner: Arc::new(kind),
        }
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.inner
    }

    // ------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------

    /// Matches every code unit
    pub fn any() -> Self {
        constants::any().clone()
    }

    /// Matches no code unit
    pub fn none() -> Self {
        constants::none().clone()
    }

    /// Matches exactly `unit`
    pub fn is(unit: u16) -> Self {
        Self::from_kind(Kind::Is(unit))
    }

    /// Matches every unit except `unit`
    pub fn is_not(unit: u16) -> Self {
        Self::from_kind(Kind::IsNot(unit))
    }

    /// Matches any unit present in `units`
    ///
    /// Specialised by size: no units is [`CharMatcher::none`], one unit is
    /// [`CharMatcher::is`], two units get a dedicated comparison, larger sets
    /// are sorted once and binary searched.
    pub fn any_of(units: &[u16]) -> Self {
        match *units {
            [] => Self::none(),
            [unit] => Self::is(unit),
            [first, second] => Self::from_kind(Kind::AnyOfTwo(first, second)),
            _ => {
                let mut sorted = units.to_vec().into_boxed_slice();
                sorted.sort_unstable();
                Self::from_kind(Kind::AnyOf(sorted))
            }
        }
    }

    /// Matches any unit not present in `units`
    pub fn none_of(units: &[u16]) -> Self {
        Self::any_of(units).negate()
    }

    /// Matches units in `start..=end`
    pub fn in_range(start: u16, end: u16) -> Result<Self> {
        if end < start {
            return Err(MatchError::InvalidRange { start, end });
        }
        Ok(Self::from_kind(Kind::InRange(start, end)))
    }

    /// Adapt an arbitrary predicate so it joins the matcher algebra
    ///
    /// `name` is used for display only.
    pub fn for_predicate<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(u16) -> bool + Send + Sync + 'static,
    {
        Self::from_kind(Kind::Predicate {
            name: name.into(),
            predicate: Box::new(predicate),
        })
    }

    /// [`CharMatcher::is`] for a `char` in the basic plane
    pub fn is_char(ch: char) -> Result<Self> {
        Ok(Self::is(single_unit(ch)?))
    }

    /// [`CharMatcher::any_of`] over the UTF-16 encoding of `chars`
    ///
    /// Supplementary characters contribute both of their surrogate units.
    pub fn any_of_str(chars: &str) -> Self {
        let units: Vec<u16> = chars.encode_utf16().collect();
        Self::any_of(&units)
    }

    /// [`CharMatcher::none_of`] over the UTF-16 encoding of `chars`
    pub fn none_of_str(chars: &str) -> Self {
        Self::any_of_str(chars).negate()
    }

    /// [`CharMatcher::in_range`] between two basic-plane `char`s
    pub fn in_char_range(start: char, end: char) -> Result<Self> {
        Self::in_range(single_unit(start)?, single_unit(end)?)
    }

    // ------------------------------------------------------------------
    // Matching
    // ------------------------------------------------------------------

    /// Classify one code unit
    pub fn matches(&self, unit: u16) -> bool {
        match self.kind() {
            Kind::Any => true,
            Kind::None => false,
            Kind::Is(expected) => unit == *expected,
            Kind::IsNot(excluded) => unit != *excluded,
            Kind::AnyOfTwo(first, second) => unit == *first || unit == *second,
            Kind::AnyOf(units) => units.binary_search(&unit).is_ok(),
            Kind::InRange(start, end) => *start <= unit && unit <= *end,
            Kind::Negated(original) => !original.matches(unit),
            Kind::And(components) => components.iter().all(|m| m.matches(unit)),
            Kind::Or(components) => components.iter().any(|m| m.matches(unit)),
            Kind::Table { table, .. } => table.get(unit),
            Kind::Predicate { predicate, .. } => predicate(unit),
        }
    }

    /// Classify a `char`
    ///
    /// Characters outside the basic plane occupy two code units and never
    /// match as a whole.
    pub fn matches_char(&self, ch: char) -> bool {
        single_unit(ch).is_ok_and(|unit| self.matches(unit))
    }

    // ------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------

    /// Matcher for every unit this one rejects
    ///
    /// Negating twice yields the original matcher.
    pub fn negate(&self) -> Self {
        match self.kind() {
            Kind::Any => Self::none(),
            Kind::None => Self::any(),
            Kind::Is(unit) => Self::is_not(*unit),
            Kind::IsNot(unit) => Self::is(*unit),
            Kind::Negated(original) => original.clone(),
            _ => Self::from_kind(Kind::Negated(self.clone())),
        }
    }

    /// Matcher for units accepted by both `self` and `other`
    pub fn and(&self, other: &CharMatcher) -> Self {
        match self.kind() {
            Kind::Any => other.clone(),
            Kind::None => self.clone(),
            Kind::Is(unit) => {
                if other.matches(*unit) {
                    self.clone()
                } else {
                    Self::none()
                }
            }
            Kind::IsNot(unit) if !other.matches(*unit) => other.clone(),
            _ => Self::from_kind(Kind::And(flatten(self, other, Junction::And))),
        }
    }

    /// Matcher for units accepted by `self` or `other`
    pub fn or(&self, other: &CharMatcher) -> Self {
        match self.kind() {
            Kind::Any => self.clone(),
            Kind::None => other.clone(),
            Kind::Is(unit) if other.matches(*unit) => other.clone(),
            Kind::IsNot(unit) => {
                if other.matches(*unit) {
                    Self::any()
                } else {
                    self.clone()
                }
            }
            _ => Self::from_kind(Kind::Or(flatten(self, other, Junction::Or))),
        }
    }

    // ------------------------------------------------------------------
    // Precomputation
    // ------------------------------------------------------------------

    /// Equivalent matcher backed by a 65536-bit lookup table
    ///
    /// Calling this on a matcher that is already precomputed returns it
    /// unchanged; the table is never rebuilt.
    pub fn precomputed(&self) -> Self {
        if self.is_precomputed() {
            return self.clone();
        }
        self.precomputed_as(Cow::Owned(self.to_string()))
    }

    /// Precompute with a fixed display label
    pub(crate) fn precomputed_as(&self, label: impl Into<Cow<'static, str>>) -> Self {
        let label = label.into();
        let mut table = LookupTable::new();
        self.set_bits(&mut table);
        debug!(
            matcher = %label,
            cardinality = table.cardinality(),
            "built lookup table"
        );
        Self::from_kind(Kind::Table { table, label })
    }

    /// Whether this matcher answers from a lookup table
    pub fn is_precomputed(&self) -> bool {
        matches!(self.kind(), Kind::Table { .. })
    }

    /// Set the bit of every unit this matcher accepts
    ///
    /// Variants that know their members set them directly; everything else
    /// sweeps the whole domain through [`CharMatcher::matches`].
    fn set_bits(&self, table: &mut LookupTable) {
        match self.kind() {
            Kind::None => {}
            Kind::Is(unit) => table.set(*unit),
            Kind::AnyOfTwo(first, second) => {
                table.set(*first);
                table.set(*second);
            }
            Kind::AnyOf(units) => units.iter().for_each(|&unit| table.set(unit)),
            Kind::InRange(start, end) => table.set_range(*start, *end),
            Kind::Or(components) => components.iter().for_each(|m| m.set_bits(table)),
            Kind::Table { table: source, .. } => table.union_with(source),
            _ => {
                for unit in 0..=u16::MAX {
                    if self.matches(unit) {
                        table.set(unit);
                    }
                }
            }
        }
    }

    /// Whether both handles share the same underlying matcher
    pub fn ptr_eq(&self, other: &CharMatcher) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Encode `ch` as exactly one code unit
pub(crate) fn single_unit(ch: char) -> Result<u16> {
    u16::try_from(u32::from(ch)).map_err(|_| MatchError::NotSingleUnit(ch))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Junction {
    And,
    Or,
}

/// Merge two operands into one component list, splicing in the components
/// of operands that are already the same kind of junction
fn flatten(left: &CharMatcher, right: &CharMatcher, junction: Junction) -> Components {
    let mut components: Components = smallvec![];
    for operand in [left, right] {
        match (operand.kind(), junction) {
            (Kind::And(inner), Junction::And) | (Kind::Or(inner), Junction::Or) => {
                components.extend(inner.iter().cloned());
            }
            _ => components.push(operand.clone()),
        }
    }
    components
}

// ----------------------------------------------------------------------
// Display
// ----------------------------------------------------------------------

/// Render a unit the way the expression parser reads it back
fn fmt_unit(f: &mut fmt::Formatter<'_>, unit: u16) -> fmt::Result {
    match u8::try_from(unit) {
        Ok(byte) if byte.is_ascii_graphic() && !b"|&()!\\".contains(&byte) => {
            write!(f, "{}", byte as char)
        }
        _ => write!(f, "\\u{{{unit:04x}}}"),
    }
}

fn fmt_components(
    f: &mut fmt::Formatter<'_>,
    components: &[CharMatcher],
    separator: &str,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, component) in components.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{component}")?;
    }
    f.write_str(")")
}

impl fmt::Display for CharMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Kind::Any => f.write_str("any"),
            Kind::None => f.write_str("none"),
            Kind::Is(unit) => {
                f.write_str("is:")?;
                fmt_unit(f, *unit)
            }
            Kind::IsNot(unit) => {
                f.write_str("!is:")?;
                fmt_unit(f, *unit)
            }
            Kind::AnyOfTwo(first, second) => {
                f.write_str("any-of:")?;
                fmt_unit(f, *first)?;
                fmt_unit(f, *second)
            }
            Kind::AnyOf(units) => {
                f.write_str("any-of:")?;
                units.iter().try_for_each(|&unit| fmt_unit(f, unit))
            }
            Kind::InRange(start, end) => {
                f.write_str("range:")?;
                fmt_unit(f, *start)?;
                f.write_str("-")?;
                fmt_unit(f, *end)
            }
            Kind::Negated(original) => write!(f, "!{original}"),
            Kind::And(components) => fmt_components(f, components, " & "),
            Kind::Or(components) => fmt_components(f, components, " | "),
            Kind::Table { label, .. } => f.write_str(label),
            Kind::Predicate { name, .. } => f.write_str(name),
        }
    }
}

impl fmt::Debug for CharMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CharMatcher")
            .field(&format_args!("{self}"))
            .finish()
    }
}
