//! Matcher expressions
//!
//! A compact textual form for building matchers at runtime, used by the
//! command line and configuration files:
//!
//! ```text
//! expr   := term ('|' term)*
//! term   := factor ('&' factor)*
//! factor := '!' factor | '(' expr ')' | atom
//! atom   := NAME | 'is:' UNIT | 'any-of:' TEXT | 'none-of:' TEXT
//!         | 'range:' UNIT '-' UNIT
//! ```
//!
//! `TEXT` runs until whitespace or an unescaped `|`, `&` or `)`. A backslash
//! escapes the next character; `\u{XXXX}` names a code unit directly and
//! `\n`, `\t`, `\r`, `\s` stand for newline, tab, carriage return and space.
//! The `Display` output of a matcher built from these forms parses back to
//! an equivalent matcher.

use std::collections::HashMap;
use std::str::FromStr;

use crate::constants;
use crate::error::{MatchError, Result};
use crate::matcher::{single_unit, CharMatcher};

/// Parse an expression that only refers to builtin names
pub fn parse(expression: &str) -> Result<CharMatcher> {
    Parser::new(expression, None).parse()
}

/// Parse an expression that may also refer to caller-defined aliases
///
/// Builtin names take precedence over aliases.
pub fn parse_with_aliases(
    expression: &str,
    aliases: &HashMap<String, CharMatcher>,
) -> Result<CharMatcher> {
    Parser::new(expression, Some(aliases)).parse()
}

impl FromStr for CharMatcher {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    aliases: Option<&'a HashMap<String, CharMatcher>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, aliases: Option<&'a HashMap<String, CharMatcher>>) -> Self {
        Self {
            input,
            pos: 0,
            aliases,
        }
    }

    fn parse(mut self) -> Result<CharMatcher> {
        let matcher = self.expr()?;
        self.skip_whitespace();
        if self.peek().is_some() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(matcher)
    }

    fn expr(&mut self) -> Result<CharMatcher> {
        let mut matcher = self.term()?;
        loop {
            self.skip_whitespace();
            if !self.eat('|') {
                return Ok(matcher);
            }
            matcher = matcher.or(&self.term()?);
        }
    }

    fn term(&mut self) -> Result<CharMatcher> {
        let mut matcher = self.factor()?;
        loop {
            self.skip_whitespace();
            if !self.eat('&') {
                return Ok(matcher);
            }
            matcher = matcher.and(&self.factor()?);
        }
    }

    fn factor(&mut self) -> Result<CharMatcher> {
        self.skip_whitespace();
        if self.eat('!') {
            return Ok(self.factor()?.negate());
        }
        if self.eat('(') {
            let matcher = self.expr()?;
            self.skip_whitespace();
            if !self.eat(')') {
                return Err(self.error("expected ')'"));
            }
            return Ok(matcher);
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<CharMatcher> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                self.bump(ch);
            } else {
                break;
            }
        }
        let word = &self.input[start..self.pos];
        if word.is_empty() {
            return Err(self.error("expected a matcher"));
        }

        if !self.eat(':') {
            return self.resolve(word);
        }
        match word {
            "is" => Ok(CharMatcher::is(self.single_unit()?)),
            "any-of" => Ok(CharMatcher::any_of(&self.text()?)),
            "none-of" => Ok(CharMatcher::none_of(&self.text()?)),
            "range" => {
                let low = self.single_unit()?;
                if !self.eat('-') {
                    return Err(self.error("expected '-' between range bounds"));
                }
                let high = self.single_unit()?;
                CharMatcher::in_range(low, high)
            }
            _ => Err(MatchError::InvalidExpression {
                position: start,
                reason: format!("unknown matcher form '{word}:'"),
            }),
        }
    }

    fn resolve(&self, name: &str) -> Result<CharMatcher> {
        if let Some(constant) = constants::by_name(name) {
            return Ok(constant.clone());
        }
        self.aliases
            .and_then(|aliases| aliases.get(name))
            .cloned()
            .ok_or_else(|| MatchError::UnknownMatcher(name.to_string()))
    }

    /// One code unit, literal or escaped
    fn single_unit(&mut self) -> Result<u16> {
        match self.units()? {
            Some(units) if units.len() == 1 => Ok(units[0]),
            Some(_) => Err(self.error("expected a character in the basic plane")),
            None => Err(self.error("expected a character")),
        }
    }

    /// Non-empty run of code units up to the next delimiter
    fn text(&mut self) -> Result<Vec<u16>> {
        let mut collected = Vec::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || matches!(ch, '|' | '&' | ')') {
                break;
            }
            if let Some(units) = self.units()? {
                collected.extend(units);
            }
        }
        if collected.is_empty() {
            return Err(self.error("expected at least one character"));
        }
        Ok(collected)
    }

    /// Units of the next literal or escaped character
    fn units(&mut self) -> Result<Option<Vec<u16>>> {
        let Some(ch) = self.peek() else {
            return Ok(None);
        };
        self.bump(ch);
        if ch != '\\' {
            return Ok(Some(ch.encode_utf16(&mut [0; 2]).to_vec()));
        }

        let Some(escaped) = self.peek() else {
            return Err(self.error("dangling escape"));
        };
        self.bump(escaped);
        let unit = match escaped {
            'n' => u16::from(b'\n'),
            't' => u16::from(b'\t'),
            'r' => u16::from(b'\r'),
            's' => u16::from(b' '),
            'u' => self.hex_unit()?,
            other => single_unit(other)?,
        };
        Ok(Some(vec![unit]))
    }

    /// The `{XXXX}` part of a `\u{XXXX}` escape
    fn hex_unit(&mut self) -> Result<u16> {
        if !self.eat('{') {
            return Err(self.error("expected '{' after \\u"));
        }
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_hexdigit() {
                break;
            }
            self.bump(ch);
        }
        let digits = &self.input[start..self.pos];
        if !self.eat('}') {
            return Err(self.error("expected '}' closing \\u escape"));
        }
        u16::from_str_radix(digits, 16).map_err(|_| MatchError::InvalidExpression {
            position: start,
            reason: format!("'{digits}' is not a code unit"),
        })
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump(expected);
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump(ch);
        }
    }

    fn error(&self, reason: &str) -> MatchError {
        MatchError::InvalidExpression {
            position: self.pos,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(ch: char) -> u16 {
        ch as u16
    }

    #[test]
    fn test_builtin_names() {
        assert!(parse("whitespace").unwrap().ptr_eq(constants::whitespace()));
        assert!(parse("  digit ").unwrap().ptr_eq(constants::digit()));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            parse("vowels").unwrap_err(),
            MatchError::UnknownMatcher("vowels".to_string())
        );
    }

    #[test]
    fn test_atoms() {
        let is_a = parse("is:a").unwrap();
        assert!(is_a.matches(unit('a')));
        assert!(!is_a.matches(unit('b')));

        let vowels = parse("any-of:aeiou").unwrap();
        assert_eq!(vowels.count_in_str("education"), 5);

        let consonants = parse("none-of:aeiou").unwrap();
        assert_eq!(consonants.count_in_str("education"), 4);

        let lower = parse("range:a-z").unwrap();
        assert!(lower.matches(unit('q')));
        assert!(!lower.matches(unit('Q')));
    }

    #[test]
    fn test_operators_and_precedence() {
        // & binds tighter than |
        let m = parse("is:a | is:b & is:c").unwrap();
        assert!(m.matches(unit('a')));
        assert!(!m.matches(unit('b')));

        let grouped = parse("(is:a | is:b) & !is:b").unwrap();
        assert!(grouped.matches(unit('a')));
        assert!(!grouped.matches(unit('b')));

        let not_ws = parse("!whitespace").unwrap();
        assert!(not_ws.matches(unit('x')));
        assert!(!not_ws.matches(unit(' ')));
    }

    #[test]
    fn test_escapes() {
        let m = parse(r"any-of:\|\&\)\s\t\u{3000}").unwrap();
        for ch in ['|', '&', ')', ' ', '\t', '\u{3000}'] {
            assert!(m.matches(unit(ch)), "{ch:?}");
        }
        assert_eq!(parse(r"is:\u{d800}").unwrap().to_string(), r"is:\u{d800}");
    }

    #[test]
    fn test_text_stops_at_delimiters() {
        let m = parse("any-of:ab|any-of:cd").unwrap();
        assert_eq!(m.count_in_str("abcdx"), 4);
    }

    #[test]
    fn test_aliases() {
        let mut aliases = HashMap::new();
        aliases.insert("vowels".to_string(), CharMatcher::any_of_str("aeiou"));
        let m = parse_with_aliases("vowels | digit", &aliases).unwrap();
        assert_eq!(m.count_in_str("a1b2e"), 4);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse("(is:a"),
            Err(MatchError::InvalidExpression { position: 5, .. })
        ));
        assert!(matches!(
            parse("is:a )"),
            Err(MatchError::InvalidExpression { position: 5, .. })
        ));
        assert!(matches!(
            parse(""),
            Err(MatchError::InvalidExpression { position: 0, .. })
        ));
        assert!(matches!(
            parse("any-of:"),
            Err(MatchError::InvalidExpression { .. })
        ));
        assert!(matches!(
            parse("bogus:x"),
            Err(MatchError::InvalidExpression { position: 0, .. })
        ));
        assert!(matches!(
            parse(r"is:\u{12345}"),
            Err(MatchError::InvalidExpression { .. })
        ));
        assert_eq!(
            parse("range:z-a").unwrap_err(),
            MatchError::InvalidRange {
                start: unit('z'),
                end: unit('a'),
            }
        );
    }

    #[test]
    fn test_display_round_trip() {
        let originals = [
            CharMatcher::is(unit('|')),
            CharMatcher::is_not(unit('x')),
            CharMatcher::any_of_str("a b!"),
            CharMatcher::in_char_range('0', '9').unwrap(),
            CharMatcher::any_of_str("xy")
                .or(&CharMatcher::in_char_range('a', 'c').unwrap())
                .and(&CharMatcher::is_not(unit('b'))),
        ];
        for original in originals {
            let reparsed: CharMatcher = original.to_string().parse().unwrap();
            for u in 0..=0x3000u16 {
                assert_eq!(reparsed.matches(u), original.matches(u), "{original} at {u}");
            }
        }
    }
}
