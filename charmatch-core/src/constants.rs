//! Ready-made matchers
//!
//! Every constant is a process-wide singleton built on first use. Constants
//! documented as precomputed build their lookup table inside that one-time
//! initialisation and are lock-free to query afterwards.
//!
//! The range tables for [`invisible`] and [`single_width`] are versioned data
//! carried over as-is; they are not re-derived from a Unicode database.

use std::sync::OnceLock;

use tracing::debug;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::matcher::{CharMatcher, Kind};
use crate::table::LookupTable;

static ANY: OnceLock<CharMatcher> = OnceLock::new();
static NONE: OnceLock<CharMatcher> = OnceLock::new();
static ASCII: OnceLock<CharMatcher> = OnceLock::new();
static WHITESPACE: OnceLock<CharMatcher> = OnceLock::new();
static LEGACY_WHITESPACE: OnceLock<CharMatcher> = OnceLock::new();
static JAVA_WHITESPACE: OnceLock<CharMatcher> = OnceLock::new();
static DIGIT: OnceLock<CharMatcher> = OnceLock::new();
static INVISIBLE: OnceLock<CharMatcher> = OnceLock::new();
static SINGLE_WIDTH: OnceLock<CharMatcher> = OnceLock::new();
static LETTER: OnceLock<CharMatcher> = OnceLock::new();
static LETTER_OR_DIGIT: OnceLock<CharMatcher> = OnceLock::new();
static JAVA_DIGIT: OnceLock<CharMatcher> = OnceLock::new();
static UPPER_CASE: OnceLock<CharMatcher> = OnceLock::new();
static LOWER_CASE: OnceLock<CharMatcher> = OnceLock::new();
static ISO_CONTROL: OnceLock<CharMatcher> = OnceLock::new();
static NUMERIC: OnceLock<CharMatcher> = OnceLock::new();

/// Unicode whitespace, listed explicitly; U+2000..=U+200A is added as a range
const WHITESPACE_UNITS: [u16; 15] = [
    0x0009, 0x000a, 0x000b, 0x000c, 0x000d, 0x0020, 0x0085, 0x00a0, 0x1680, 0x180e, 0x2028,
    0x2029, 0x202f, 0x205f, 0x3000,
];

const LEGACY_WHITESPACE_UNITS: [u16; 8] =
    [0x0020, 0x000d, 0x000a, 0x0009, 0x3000, 0x00a0, 0x2007, 0x202f];

/// Zero digit of every script whose decimal digits are contiguous
const ZEROES: [u16; 31] = [
    0x0030, 0x0660, 0x06f0, 0x07c0, 0x0966, 0x09e6, 0x0a66, 0x0ae6, 0x0b66, 0x0be6, 0x0c66,
    0x0ce6, 0x0d66, 0x0e50, 0x0ed0, 0x0f20, 0x1040, 0x1090, 0x17e0, 0x1810, 0x1946, 0x19d0,
    0x1b50, 0x1bb0, 0x1c40, 0x1c50, 0xa620, 0xa8d0, 0xa900, 0xaa50, 0xff10,
];

/// Space, line and paragraph separators, controls, formats, surrogates and
/// private use (inclusive ranges)
const INVISIBLE_RANGES: &[(u16, u16)] = &[
    (0x0000, 0x0020),
    (0x007f, 0x00a0),
    (0x00ad, 0x00ad),
    (0x0600, 0x0603),
    (0x06dd, 0x06dd),
    (0x070f, 0x070f),
    (0x1680, 0x1680),
    (0x17b4, 0x17b5),
    (0x180e, 0x180e),
    (0x2000, 0x200f),
    (0x2028, 0x202f),
    (0x205f, 0x2063),
    (0x206a, 0x206f),
    (0x3000, 0x3000),
    (0xd800, 0xf8ff),
    (0xfeff, 0xfeff),
    (0xfff9, 0xfffb),
];

/// Units known to render single-width; anything else is assumed double-width
const SINGLE_WIDTH_RANGES: &[(u16, u16)] = &[
    (0x0000, 0x04f9),
    (0x05be, 0x05be),
    (0x05d0, 0x05ea),
    (0x05f3, 0x05f4),
    (0x0600, 0x06ff),
    (0x0750, 0x077f),
    (0x0e00, 0x0e7f),
    (0x1e00, 0x20af),
    (0x2100, 0x213a),
    (0xfb50, 0xfdff),
    (0xfe70, 0xfeff),
    (0xff61, 0xffdc),
];

/// Matches every code unit
pub fn any() -> &'static CharMatcher {
    ANY.get_or_init(|| CharMatcher::from_kind(Kind::Any))
}

/// Matches no code unit
pub fn none() -> &'static CharMatcher {
    NONE.get_or_init(|| CharMatcher::from_kind(Kind::None))
}

/// U+0000..=U+007F
pub fn ascii() -> &'static CharMatcher {
    ASCII.get_or_init(|| range(0x0000, 0x007f))
}

/// Whitespace according to the Unicode White_Space property (precomputed)
///
/// Not the same set as [`legacy_whitespace`] or [`java_whitespace`].
pub fn whitespace() -> &'static CharMatcher {
    WHITESPACE.get_or_init(|| {
        CharMatcher::any_of(&WHITESPACE_UNITS)
            .or(&range(0x2000, 0x200a))
            .precomputed_as("whitespace")
    })
}

/// The small whitespace set older string utilities used
pub fn legacy_whitespace() -> &'static CharMatcher {
    LEGACY_WHITESPACE.get_or_init(|| CharMatcher::any_of(&LEGACY_WHITESPACE_UNITS))
}

/// Classic platform whitespace: space separators except the non-breaking
/// ones, plus the ASCII and information-separator controls
pub fn java_whitespace() -> &'static CharMatcher {
    JAVA_WHITESPACE.get_or_init(|| {
        CharMatcher::for_predicate("java-whitespace", |unit| {
            matches!(
                unit,
                0x0009..=0x000d
                    | 0x001c..=0x0020
                    | 0x1680
                    | 0x2000..=0x2006
                    | 0x2008..=0x200a
                    | 0x2028
                    | 0x2029
                    | 0x205f
                    | 0x3000
            )
        })
    })
}

/// Decimal digits of every script listed in the zero table (precomputed)
///
/// This constant exists only as its lookup table: the bits are set straight
/// from the zero table during initialisation, so there is no slower
/// classification path that could disagree with it.
pub fn digit() -> &'static CharMatcher {
    DIGIT.get_or_init(|| {
        let mut table = LookupTable::new();
        for zero in ZEROES {
            table.set_range(zero, zero + 9);
        }
        debug!(cardinality = table.cardinality(), "built digit table");
        CharMatcher::from_kind(Kind::Table {
            table,
            label: "digit".into(),
        })
    })
}

/// Invisible units (precomputed)
pub fn invisible() -> &'static CharMatcher {
    INVISIBLE.get_or_init(|| union_of_ranges(INVISIBLE_RANGES).precomputed_as("invisible"))
}

/// Single-width units (precomputed)
///
/// Errs on the side of `false`: a unit not known to be single-width is
/// treated as double-width.
pub fn single_width() -> &'static CharMatcher {
    SINGLE_WIDTH
        .get_or_init(|| union_of_ranges(SINGLE_WIDTH_RANGES).precomputed_as("single-width"))
}

/// Letters: general categories Lu, Ll, Lt, Lm and Lo
///
/// Letter numbers such as U+2167 and combining marks are not letters.
pub fn letter() -> &'static CharMatcher {
    LETTER.get_or_init(|| char_property("letter", is_letter))
}

/// Decimal digits of every script: general category Nd
///
/// Wider than [`digit`], which covers a fixed list of 31 scripts. Fractions
/// and letter numbers never match.
pub fn java_digit() -> &'static CharMatcher {
    JAVA_DIGIT.get_or_init(|| char_property("java-digit", is_decimal_digit))
}

/// Union of [`letter`] and [`java_digit`]
pub fn letter_or_digit() -> &'static CharMatcher {
    LETTER_OR_DIGIT.get_or_init(|| {
        char_property("letter-or-digit", |c| is_letter(c) || is_decimal_digit(c))
    })
}

/// Uppercase characters
pub fn upper_case() -> &'static CharMatcher {
    UPPER_CASE.get_or_init(|| char_property("upper-case", char::is_uppercase))
}

/// Lowercase characters
pub fn lower_case() -> &'static CharMatcher {
    LOWER_CASE.get_or_init(|| char_property("lower-case", char::is_lowercase))
}

/// C0 and C1 control characters
pub fn iso_control() -> &'static CharMatcher {
    ISO_CONTROL.get_or_init(|| char_property("iso-control", char::is_control))
}

/// Numeric characters of any kind (decimal, letter-like and other numbers)
pub fn numeric() -> &'static CharMatcher {
    NUMERIC.get_or_init(|| char_property("numeric", char::is_numeric))
}

/// Builtin constant registry entry
pub struct NamedConstant {
    /// Name used by expressions and the command line
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Accessor for the singleton
    pub get: fn() -> &'static CharMatcher,
}

/// Every builtin constant, in listing order
pub const REGISTRY: &[NamedConstant] = &[
    NamedConstant {
        name: "any",
        description: "every code unit",
        get: any,
    },
    NamedConstant {
        name: "none",
        description: "no code unit",
        get: none,
    },
    NamedConstant {
        name: "ascii",
        description: "U+0000 to U+007F",
        get: ascii,
    },
    NamedConstant {
        name: "whitespace",
        description: "Unicode White_Space",
        get: whitespace,
    },
    NamedConstant {
        name: "legacy-whitespace",
        description: "space, CR, LF, tab and four wide or non-breaking spaces",
        get: legacy_whitespace,
    },
    NamedConstant {
        name: "java-whitespace",
        description: "separators without non-breaking spaces, plus controls",
        get: java_whitespace,
    },
    NamedConstant {
        name: "digit",
        description: "decimal digits of 31 scripts",
        get: digit,
    },
    NamedConstant {
        name: "invisible",
        description: "separators, controls, formats, surrogates, private use",
        get: invisible,
    },
    NamedConstant {
        name: "single-width",
        description: "units rendered single-width",
        get: single_width,
    },
    NamedConstant {
        name: "letter",
        description: "general categories L*",
        get: letter,
    },
    NamedConstant {
        name: "java-digit",
        description: "decimal digits of every script (Nd)",
        get: java_digit,
    },
    NamedConstant {
        name: "letter-or-digit",
        description: "letter or java-digit",
        get: letter_or_digit,
    },
    NamedConstant {
        name: "upper-case",
        description: "uppercase",
        get: upper_case,
    },
    NamedConstant {
        name: "lower-case",
        description: "lowercase",
        get: lower_case,
    },
    NamedConstant {
        name: "iso-control",
        description: "C0 and C1 controls",
        get: iso_control,
    },
    NamedConstant {
        name: "numeric",
        description: "any numeric character",
        get: numeric,
    },
];

/// Look up a builtin constant by name
pub fn by_name(name: &str) -> Option<&'static CharMatcher> {
    REGISTRY
        .iter()
        .find(|constant| constant.name == name)
        .map(|constant| (constant.get)())
}

/// Names of every builtin constant
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|constant| constant.name)
}

/// Range with bounds known to be ordered
fn range(start: u16, end: u16) -> CharMatcher {
    debug_assert!(start <= end);
    CharMatcher::from_kind(Kind::InRange(start, end))
}

fn union_of_ranges(ranges: &[(u16, u16)]) -> CharMatcher {
    ranges
        .iter()
        .fold(none().clone(), |acc, &(start, end)| {
            let next = if start == end {
                CharMatcher::is(start)
            } else {
                range(start, end)
            };
            acc.or(&next)
        })
}

fn char_property(name: &'static str, property: fn(char) -> bool) -> CharMatcher {
    CharMatcher::for_predicate(name, move |unit| {
        char::from_u32(u32::from(unit)).is_some_and(property)
    })
}

fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

fn is_decimal_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn test_any_none_singletons() {
        assert!(any().ptr_eq(&CharMatcher::any()));
        assert!(none().ptr_eq(&CharMatcher::none()));
        for unit in [0u16, 0x41, 0xd800, u16::MAX] {
            assert!(any().matches(unit));
            assert!(!none().matches(unit));
        }
    }

    #[test]
    fn test_any_none_identity_laws() {
        let x = CharMatcher::any_of_str("xyz");
        assert!(any().and(&x).ptr_eq(&x));
        assert!(any().or(&x).ptr_eq(any()));
        assert!(any().negate().ptr_eq(none()));
        assert!(none().and(&x).ptr_eq(none()));
        assert!(none().or(&x).ptr_eq(&x));
        assert!(none().negate().ptr_eq(any()));
    }

    #[test]
    fn test_ascii_bounds() {
        assert!(ascii().matches(0));
        assert!(ascii().matches(0x7f));
        assert!(!ascii().matches(0x80));
    }

    #[test]
    fn test_whitespace_members() {
        let ws = whitespace();
        assert!(ws.is_precomputed());
        for unit in WHITESPACE_UNITS {
            assert!(ws.matches(unit), "{unit:#06x}");
        }
        for unit in 0x2000..=0x200a {
            assert!(ws.matches(unit), "{unit:#06x}");
        }
        assert!(!ws.matches(0x200b));
        assert!(!ws.matches(u16::from(b'a')));
        assert_eq!(ws.to_string(), "whitespace");
    }

    #[test]
    fn test_whitespace_definitions_differ() {
        // U+0085 is Unicode whitespace only
        assert!(whitespace().matches(0x0085));
        assert!(!legacy_whitespace().matches(0x0085));
        assert!(!java_whitespace().matches(0x0085));

        // U+2007 figure space is non-breaking
        assert!(legacy_whitespace().matches(0x2007));
        assert!(!java_whitespace().matches(0x2007));

        // U+001C information separator: platform definition only
        assert!(java_whitespace().matches(0x001c));
        assert!(!whitespace().matches(0x001c));
        assert!(!legacy_whitespace().matches(0x001c));

        // Non-breaking space
        assert!(whitespace().matches(0x00a0));
        assert!(legacy_whitespace().matches(0x00a0));
        assert!(!java_whitespace().matches(0x00a0));
    }

    #[test]
    fn test_digit_across_scripts() {
        let d = digit();
        assert!(d.is_precomputed());
        assert!(d.matches_all_of(&units("0123456789")));
        assert!(d.matches_all_of(&units("٠١٢٣٤٥٦٧٨٩")));
        assert!(d.matches_all_of(&units("०९")));
        assert!(d.matches_all_of(&units("０９")));
        assert!(d.matches_none_of(&units("a/:½Ⅷ")));
        assert_eq!(d.count_in(&(0..=u16::MAX).collect::<Vec<_>>()), 310);
    }

    #[test]
    fn test_invisible_ranges() {
        let inv = invisible();
        assert!(inv.is_precomputed());
        assert!(inv.matches(0x0000));
        assert!(inv.matches(0x0020));
        assert!(!inv.matches(0x0021));
        assert!(inv.matches(0x00ad));
        assert!(inv.matches(0xd800));
        assert!(inv.matches(0xf8ff));
        assert!(!inv.matches(0xf900));
        assert!(inv.matches(0xfeff));
        assert!(inv.matches(0xfffb));
        assert!(!inv.matches(0xfffc));
    }

    #[test]
    fn test_single_width_ranges() {
        let sw = single_width();
        assert!(sw.matches(u16::from(b'A')));
        assert!(sw.matches(0x04f9));
        assert!(!sw.matches(0x04fa));
        assert!(sw.matches(0x05f4));
        assert!(sw.matches(0xff61));
        assert!(!sw.matches(0x3042));
        assert!(!sw.matches(0xff10));
    }

    #[test]
    fn test_char_properties() {
        assert!(letter().matches(u16::from(b'q')));
        assert!(letter().matches(0x3042));
        assert!(!letter().matches(u16::from(b'1')));
        assert!(letter_or_digit().matches(u16::from(b'1')));
        assert!(upper_case().matches(u16::from(b'Q')));
        assert!(!upper_case().matches(u16::from(b'q')));
        assert!(lower_case().matches(u16::from(b'q')));
        assert!(iso_control().matches(0x009f));
        assert!(!iso_control().matches(0x00a0));
        assert!(numeric().matches(0x00bd));
        assert!(!letter().matches(0xd800));
    }

    #[test]
    fn test_letter_is_general_category_letter() {
        assert!(letter().matches_all_of(&units("aZéǅʰあ")));
        // Roman numeral eight is a letter number
        assert!(!letter().matches(0x2167));
        // Combining Greek ypogegrammeni is a mark
        assert!(!letter().matches(0x0345));
        assert!(!letter().matches(0x00bd));
    }

    #[test]
    fn test_java_digit_is_decimal_number() {
        let d = java_digit();
        assert!(d.matches_all_of(&units("05٣९０")));
        assert!(d.matches(0x0966));
        assert!(d.matches_none_of(&units("½Ⅷ²a")));
        assert!(!d.matches(0xdc00));
        assert!(by_name("java-digit").unwrap().ptr_eq(d));
        // Every table digit is also a decimal number
        let all: Vec<u16> = (0..=u16::MAX).collect();
        assert!(digit().and(&d.negate()).matches_none_of(&all));
    }

    #[test]
    fn test_letter_or_digit_is_union() {
        let lod = letter_or_digit();
        assert!(lod.matches_all_of(&units("a1٣é")));
        assert!(!lod.matches(0x00bd));
        assert!(!lod.matches(0x2167));
        assert!(!lod.matches(u16::from(b'_')));
        let all: Vec<u16> = (0..=u16::MAX).collect();
        let union = letter().or(java_digit());
        assert_eq!(lod.count_in(&all), union.count_in(&all));
    }

    #[test]
    fn test_registry_lookup() {
        assert!(by_name("digit").unwrap().ptr_eq(digit()));
        assert!(by_name("whitespace").unwrap().ptr_eq(whitespace()));
        assert!(by_name("no-such-matcher").is_none());
        assert_eq!(names().count(), REGISTRY.len());
        assert!(names().any(|name| name == "single-width"));
    }

    #[test]
    fn test_constants_initialise_once_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| invisible().clone()))
            .collect();
        let built: Vec<CharMatcher> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for matcher in &built {
            assert!(matcher.ptr_eq(invisible()));
        }
    }
}
