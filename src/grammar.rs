//! The shared alphabet of the line format.
//!
//! Both directions of the codec agree on what a *literal* is through this module:
//! the encoder asks [`is_literal_safe`] before printing a string bare, and the
//! decoder uses the same number, timestamp and unit-tuple patterns to give bare
//! literals a type again.
//!
//! ```rust
//! use serde_lines::grammar::{is_literal_safe, is_number};
//! use serde_lines::UnitSeparator;
//!
//! assert!(is_number("-3.5e10"));
//! assert!(is_literal_safe("716f337", UnitSeparator::Colon));
//! assert!(!is_literal_safe("nil", UnitSeparator::Colon));
//! assert!(!is_literal_safe("a b", UnitSeparator::Colon));
//! ```

use crate::options::UnitSeparator;
use regex::Regex;
use std::sync::LazyLock;

pub const LIT_TRUE: &str = "#t";
pub const LIT_FALSE: &str = "#f";
pub const LIT_NIL: &str = "nil";
pub const ELISION: &str = "...";

pub const SPACE: char = ' ';
pub const EQUAL: char = '=';
pub const COLON: char = ':';
pub const OPEN_BRACE: char = '{';
pub const SHUT_BRACE: char = '}';
pub const OPEN_BRACKET: char = '[';
pub const SHUT_BRACKET: char = ']';
pub const SINGLE_QUOTE: char = '\'';
pub const DOUBLE_QUOTE: char = '"';
pub const BACKSLASH: char = '\\';

/// `strftime` pattern of a timestamp literal: UTC, second precision, `Z` suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const NUM: &str = r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?";
const UNIT: &str = r#"[\p{L}%_][^\s'"=:{}\[\]]*"#;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{NUM}$")).expect("number pattern is valid"));

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2}):([0-9]{2})Z$")
        .expect("timestamp pattern is valid")
});

static UNIT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{UNIT}$")).expect("unit pattern is valid"));

static UNIT_COLON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^({NUM}):({UNIT})$")).expect("unit tuple pattern is valid")
});

static UNIT_EMPTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^({NUM})({UNIT})$")).expect("unit tuple pattern is valid")
});

/// Characters that force a string into quotes.
#[inline]
pub fn is_structural(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            SINGLE_QUOTE
                | DOUBLE_QUOTE
                | EQUAL
                | COLON
                | OPEN_BRACE
                | SHUT_BRACE
                | OPEN_BRACKET
                | SHUT_BRACKET
        )
}

/// Characters that end a bare literal while decoding.
#[inline]
pub fn ends_literal(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            EQUAL | OPEN_BRACE | SHUT_BRACE | OPEN_BRACKET | SHUT_BRACKET
        )
}

/// Keys are never sub-parsed, so only structural characters matter for them.
#[inline]
pub fn is_key_safe(s: &str) -> bool {
    !s.chars().any(is_structural)
}

/// `nil`, `#t`, `#f` and the elision marker.
#[inline]
pub fn is_reserved(s: &str) -> bool {
    matches!(s, LIT_NIL | LIT_TRUE | LIT_FALSE | ELISION)
}

/// Full match against the number pattern.
#[inline]
pub fn is_number(s: &str) -> bool {
    NUMBER_RE.is_match(s)
}

/// Whether `s` can follow a number as its unit tag.
#[inline]
pub fn is_unit_tag(s: &str) -> bool {
    UNIT_TAG_RE.is_match(s)
}

/// Splits a unit-tuple literal such as `31.9:ms` into its number and unit text.
pub fn split_unit(s: &str, separator: UnitSeparator) -> Option<(&str, &str)> {
    let re = match separator {
        UnitSeparator::Colon => &*UNIT_COLON_RE,
        UnitSeparator::Empty => &*UNIT_EMPTY_RE,
    };
    let caps = re.captures(s)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Joins `number` and `unit` into one unit-tuple literal, if that literal
/// splits back into the same two parts.
///
/// With [`UnitSeparator::Empty`] some units run into the number: `3` and `e5`
/// would read back as the number `3e5`.
pub fn unit_literal(number: &str, unit: &str, separator: UnitSeparator) -> Option<String> {
    if !is_unit_tag(unit) {
        return None;
    }
    let literal = format!("{}{}{}", number, separator.as_str(), unit);
    if is_number(&literal) || split_unit(&literal, separator) != Some((number, unit)) {
        return None;
    }
    Some(literal)
}

/// Splits a timestamp literal into year, month, day, hour, minute and second.
pub fn split_timestamp(s: &str) -> Option<[u32; 6]> {
    let caps = TIMESTAMP_RE.captures(s)?;
    let mut parts = [0u32; 6];
    for (i, part) in parts.iter_mut().enumerate() {
        *part = caps.get(i + 1)?.as_str().parse().ok()?;
    }
    Some(parts)
}

/// The literal-safety predicate: may `s` be printed bare as a value and read
/// back as the same text?
///
/// The empty string passes; callers decide how to print it.
pub fn is_literal_safe(s: &str, separator: UnitSeparator) -> bool {
    is_key_safe(s) && !is_reserved(s) && !is_number(s) && split_unit(s, separator).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_pattern() {
        for s in ["0", "-1", "33", "3.14", "-0.5", "1e16", "1E+3", "2.5e-7"] {
            assert!(is_number(s), "{} should be a number", s);
        }
        for s in ["01", "1.", ".5", "1e", "+1", "1_000", "٣", "0x10", ""] {
            assert!(!is_number(s), "{} should not be a number", s);
        }
    }

    #[test]
    fn test_timestamp_pattern() {
        assert_eq!(
            split_timestamp("2013-07-12T21:33:47Z"),
            Some([2013, 7, 12, 21, 33, 47])
        );
        assert_eq!(split_timestamp("2013-07-12T21:33:47"), None);
        assert_eq!(split_timestamp("2013-07-12T21:33:47.5Z"), None);
        assert_eq!(split_timestamp("2013-07-12"), None);
    }

    #[test]
    fn test_split_unit_colon() {
        assert_eq!(split_unit("3:ms", UnitSeparator::Colon), Some(("3", "ms")));
        assert_eq!(
            split_unit("31.9:ms", UnitSeparator::Colon),
            Some(("31.9", "ms"))
        );
        assert_eq!(split_unit("50:%", UnitSeparator::Colon), Some(("50", "%")));
        assert_eq!(split_unit("3ms", UnitSeparator::Colon), None);
        assert_eq!(split_unit("12:30", UnitSeparator::Colon), None);
    }

    #[test]
    fn test_split_unit_empty() {
        assert_eq!(split_unit("3ms", UnitSeparator::Empty), Some(("3", "ms")));
        assert_eq!(split_unit("5em", UnitSeparator::Empty), Some(("5", "em")));
        assert_eq!(
            split_unit("1e3ms", UnitSeparator::Empty),
            Some(("1e3", "ms"))
        );
        assert_eq!(split_unit("2013-07-12", UnitSeparator::Empty), None);
        assert_eq!(split_unit("3:ms", UnitSeparator::Empty), None);
    }

    #[test]
    fn test_unit_literal() {
        assert_eq!(
            unit_literal("31.9", "ms", UnitSeparator::Colon).as_deref(),
            Some("31.9:ms")
        );
        assert_eq!(
            unit_literal("3", "ms", UnitSeparator::Empty).as_deref(),
            Some("3ms")
        );
        assert_eq!(
            unit_literal("3", "e5", UnitSeparator::Colon).as_deref(),
            Some("3:e5")
        );
        assert_eq!(unit_literal("3", "e5", UnitSeparator::Empty), None);
        assert_eq!(unit_literal("3", "e5x", UnitSeparator::Empty), None);
        assert_eq!(unit_literal("3", "1ms", UnitSeparator::Colon), None);
    }

    #[test]
    fn test_literal_safety() {
        let sep = UnitSeparator::Colon;
        assert!(is_literal_safe("bar", sep));
        assert!(is_literal_safe("716f337", sep));
        assert!(is_literal_safe("1968-03-07", sep));
        assert!(is_literal_safe("", sep));
        for s in ["a b", "a=b", "a:b", "{x", "x]", "it's", "say\"", "4", "-3.3", "#t", "nil", "..."] {
            assert!(!is_literal_safe(s, sep), "{} should need quotes", s);
        }
        assert!(!is_literal_safe("716f337", UnitSeparator::Empty));
    }

    #[test]
    fn test_key_safety_ignores_reserved_words() {
        assert!(is_key_safe("3"));
        assert!(is_key_safe("nil"));
        assert!(!is_key_safe("a key"));
        assert!(!is_key_safe("k:v"));
    }
}
