//! Property-based tests for the matcher algebra and text operations
//!
//! Matchers are generated as random trees of every variant so the
//! combinator shortcuts get exercised against the plain definitions:
//! - `negate`, `and` and `or` agree with boolean logic on every unit
//! - precomputing never changes the answer and is idempotent
//! - the text operations keep their length and run relationships

use charmatch_core::{constants, CharMatcher};
use proptest::prelude::*;

/// Units drawn mostly from a small alphabet so generated text hits matches
fn unit_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![
        4 => (0x61u16..=0x66),
        2 => Just(0x20u16),
        1 => any::<u16>(),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = CharMatcher> {
    prop_oneof![
        Just(CharMatcher::any()),
        Just(CharMatcher::none()),
        unit_strategy().prop_map(CharMatcher::is),
        unit_strategy().prop_map(CharMatcher::is_not),
        prop::collection::vec(unit_strategy(), 0..6).prop_map(|units| CharMatcher::any_of(&units)),
        (unit_strategy(), unit_strategy()).prop_map(|(a, b)| {
            CharMatcher::in_range(a.min(b), a.max(b)).expect("ordered bounds")
        }),
        Just(constants::whitespace().clone()),
        Just(constants::digit().clone()),
        Just(CharMatcher::for_predicate("even", |unit| unit % 2 == 0)),
    ]
}

fn matcher_strategy() -> impl Strategy<Value = CharMatcher> {
    leaf_strategy().prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|m| m.negate()),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(&b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.or(&b)),
            inner.prop_map(|m| m.precomputed()),
        ]
    })
}

fn text_strategy() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(unit_strategy(), 0..40)
}

/// Units worth probing: the generated alphabet plus a few fixed points
fn sample_units(extra: &[u16]) -> Vec<u16> {
    let mut units: Vec<u16> = (0x5f..=0x68).collect();
    units.extend([0x00, 0x09, 0x20, 0x30, 0x39, 0x3000, 0xffff]);
    units.extend_from_slice(extra);
    units
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn negate_is_complement(m in matcher_strategy(), extra in text_strategy()) {
        let negated = m.negate();
        for unit in sample_units(&extra) {
            prop_assert_eq!(negated.matches(unit), !m.matches(unit));
        }
        for unit in sample_units(&extra) {
            prop_assert_eq!(negated.negate().matches(unit), m.matches(unit));
        }
    }

    #[test]
    fn and_or_follow_boolean_logic(
        a in matcher_strategy(),
        b in matcher_strategy(),
        extra in text_strategy(),
    ) {
        let both = a.and(&b);
        let either = a.or(&b);
        for unit in sample_units(&extra) {
            prop_assert_eq!(both.matches(unit), a.matches(unit) && b.matches(unit));
            prop_assert_eq!(either.matches(unit), a.matches(unit) || b.matches(unit));
        }
    }

    #[test]
    fn count_matches_retain_length(m in matcher_strategy(), text in text_strategy()) {
        let count = m.count_in(&text);
        prop_assert_eq!(m.retain_from(&text).len(), count);
        prop_assert_eq!(m.remove_from(&text).len(), text.len() - count);
        prop_assert!(m.matches_none_of(&m.remove_from(&text)));
        prop_assert!(m.matches_all_of(&m.retain_from(&text)));
    }

    #[test]
    fn index_points_at_matches(m in matcher_strategy(), text in text_strategy()) {
        match m.index_in(&text) {
            Some(index) => {
                prop_assert!(m.matches(text[index]));
                prop_assert!(text[..index].iter().all(|&u| !m.matches(u)));
            }
            None => prop_assert!(m.matches_none_of(&text)),
        }
        match m.last_index_in(&text) {
            Some(index) => {
                prop_assert!(m.matches(text[index]));
                prop_assert!(text[index + 1..].iter().all(|&u| !m.matches(u)));
            }
            None => prop_assert_eq!(m.count_in(&text), 0),
        }
    }

    #[test]
    fn all_and_none_are_consistent(m in matcher_strategy(), text in text_strategy()) {
        prop_assert_eq!(m.matches_all_of(&text), m.negate().matches_none_of(&text));
        prop_assert_eq!(m.matches_all_of(&text), m.count_in(&text) == text.len());
        prop_assert_eq!(m.matches_any_of(&text), m.count_in(&text) > 0);
    }

    #[test]
    fn replace_keeps_length(m in matcher_strategy(), text in text_strategy()) {
        let replaced = m.replace_from(&text, 0x2a);
        prop_assert_eq!(replaced.len(), text.len());
        for (before, after) in text.iter().zip(replaced.iter()) {
            if m.matches(*before) {
                prop_assert_eq!(*after, 0x2a);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn trim_is_idempotent(m in matcher_strategy(), text in text_strategy()) {
        let trimmed = m.trim_from(&text);
        prop_assert_eq!(m.trim_from(trimmed), trimmed);
        if let (Some(first), Some(last)) = (trimmed.first(), trimmed.last()) {
            prop_assert!(!m.matches(*first));
            prop_assert!(!m.matches(*last));
        }
    }

    #[test]
    fn collapse_leaves_no_adjacent_replacements(m in matcher_strategy(), text in text_strategy()) {
        // Use a replacement the matcher rejects so runs are observable
        let replacement = (0..=u16::MAX).find(|&u| !m.matches(u));
        if let Some(replacement) = replacement {
            let collapsed = m.collapse_from(&text, replacement);
            prop_assert!(m.matches_none_of(&collapsed));
            prop_assert_eq!(
                collapsed.iter().filter(|&&u| u != replacement).count(),
                text.iter().filter(|&&u| u != replacement && !m.matches(u)).count()
            );

            let inner = m.trim_and_collapse_from(&text, replacement);
            prop_assert_eq!(inner, m.collapse_from(m.trim_from(&text), replacement).into_owned());
        }
    }
}

proptest! {
    // Each case sweeps the whole code unit domain
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn precomputed_agrees_everywhere(m in matcher_strategy()) {
        let table = m.precomputed();
        prop_assert!(table.is_precomputed());
        for unit in 0..=u16::MAX {
            prop_assert_eq!(table.matches(unit), m.matches(unit), "unit {:#06x}", unit);
        }
        prop_assert!(table.precomputed().ptr_eq(&table));
    }
}
