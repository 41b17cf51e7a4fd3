//! Decoding of lines into value trees.
//!
//! This module provides the [`Decoder`], which parses one line of text into a
//! [`LineMap`], and the [`ValueDeserializer`], which feeds a [`Value`] tree to
//! any `T: Deserialize`.
//!
//! ## Overview
//!
//! The decoder is a single pass over the input:
//!
//! - **Pairs**: `key=value`, separated by spaces
//! - **Values**: `{...}` mappings, `[...]` sequences, quoted strings, bare literals
//! - **Literals**: `nil`, `#t`, `#f`, timestamps, numbers and unit tuples get
//!   their type back; every other bare word is text
//! - **Keys** are never typed: `3=4` has the text key `"3"`
//!
//! Failure is all-or-nothing: on malformed input no partial tree is returned.
//!
//! ## Usage
//!
//! ```rust
//! use serde_lines::{decode, Value};
//!
//! let line = decode("foo=bar bar=33").unwrap();
//! assert_eq!(line.get("foo"), Some(&Value::from("bar")));
//! assert_eq!(line.get("bar"), Some(&Value::from(33)));
//! ```

use crate::grammar::{
    self, BACKSLASH, DOUBLE_QUOTE, ELISION, EQUAL, LIT_FALSE, LIT_NIL, LIT_TRUE, OPEN_BRACE,
    OPEN_BRACKET, SHUT_BRACE, SHUT_BRACKET, SINGLE_QUOTE, SPACE, TIMESTAMP_FORMAT,
};
use crate::options::DecodeOptions;
use crate::registry;
use crate::{Error, LineMap, Number, Result, Value};
use chrono::{DateTime, TimeZone, Utc};
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{de, forward_to_deserialize_any};

/// Parses one line into a [`LineMap`].
///
/// Runs of spaces between pairs and between sequence elements are accepted,
/// as are leading spaces and trailing whitespace such as a final newline.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{DecodeOptions, Decoder, Value};
///
/// let options = DecodeOptions::new();
/// let line = Decoder::new("x=[...] y={...}\n", &options).decode().unwrap();
/// assert_eq!(line.get("x"), Some(&Value::Sequence(vec![Value::from("...")])));
/// ```
pub struct Decoder<'a> {
    input: &'a str,
    position: usize,
    depth: usize,
    options: &'a DecodeOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str, options: &'a DecodeOptions) -> Self {
        Decoder {
            input: input.trim_end(),
            position: 0,
            depth: 0,
            options,
        }
    }

    /// Consumes the decoder and parses the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with the byte position of the first character
    /// that does not fit the grammar.
    pub fn decode(mut self) -> Result<LineMap> {
        self.skip_spaces();
        self.parse_pairs(None)
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_spaces(&mut self) {
        while self.peek_char() == Some(SPACE) {
            self.position += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.position += ch.len_utf8();
                Ok(())
            }
            found => Err(Error::expected(
                self.position,
                &format!("{:?}", expected),
                found,
            )),
        }
    }

    /// After a value: a space, the enclosing closer, or end of input.
    fn expect_separator(&self, close: Option<char>) -> Result<()> {
        match self.peek_char() {
            None | Some(SPACE) => Ok(()),
            found if found == close => Ok(()),
            found => Err(Error::expected(self.position, "' '", found)),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::parse(
                self.position,
                &format!("nesting deeper than {} levels", self.options.max_depth),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// `...` right before the closer of the current mapping.
    fn at_elision(&self, close: Option<char>) -> bool {
        self.rest()
            .strip_prefix(ELISION)
            .is_some_and(|after| after.chars().next() == close)
    }

    fn parse_pairs(&mut self, close: Option<char>) -> Result<LineMap> {
        self.enter()?;
        let mut map = LineMap::new();
        loop {
            self.skip_spaces();
            let next = self.peek_char();
            if next == close {
                break;
            }
            if next.is_none() {
                let expected = close.map(|c| format!("{:?}", c)).unwrap_or_default();
                return Err(Error::expected(self.position, &expected, None));
            }
            if self.at_elision(close) {
                self.position += ELISION.len();
                map.insert(ELISION, "");
                break;
            }

            let key = self.parse_key()?;
            self.expect(EQUAL)?;
            let value = self.parse_value()?;
            // Last occurrence wins.
            map.insert(key, value);
            self.expect_separator(close)?;
        }
        self.leave();
        Ok(map)
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek_char() {
            Some(quote @ (SINGLE_QUOTE | DOUBLE_QUOTE)) => self.parse_quoted(quote),
            _ => Ok(self.scan_literal().to_string()),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek_char() {
            Some(OPEN_BRACE) => {
                self.position += 1;
                let map = self.parse_pairs(Some(SHUT_BRACE))?;
                self.expect(SHUT_BRACE)?;
                Ok(Value::Mapping(map))
            }
            Some(OPEN_BRACKET) => self.parse_sequence(),
            Some(quote @ (SINGLE_QUOTE | DOUBLE_QUOTE)) => self.parse_quoted(quote).map(Value::Text),
            _ => {
                let literal = self.scan_literal();
                Ok(self.literal_value(literal))
            }
        }
    }

    fn parse_sequence(&mut self) -> Result<Value> {
        self.position += 1;
        self.enter()?;
        let mut items = Vec::new();
        loop {
            self.skip_spaces();
            match self.peek_char() {
                Some(SHUT_BRACKET) => break,
                None => return Err(Error::expected(self.position, "']'", None)),
                _ => {}
            }
            items.push(self.parse_value()?);
            self.expect_separator(Some(SHUT_BRACKET))?;
        }
        self.position += 1;
        self.leave();
        Ok(Value::Sequence(items))
    }

    /// Reads a quoted string starting at its opening quote.
    fn parse_quoted(&mut self, quote: char) -> Result<String> {
        self.position += quote.len_utf8();
        let mut out = String::new();
        loop {
            match self.next_char() {
                Some(BACKSLASH) => match self.next_char() {
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some(c) if c == BACKSLASH || c == quote => out.push(c),
                    Some(c) => {
                        out.push(BACKSLASH);
                        out.push(c);
                    }
                    None => break,
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => break,
            }
        }
        Err(Error::parse(self.position, "unterminated quoted string"))
    }

    fn scan_literal(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest.find(grammar::ends_literal).unwrap_or(rest.len());
        self.position += end;
        &rest[..end]
    }

    fn literal_value(&self, literal: &str) -> Value {
        match literal {
            LIT_NIL => return Value::Null,
            LIT_TRUE => return Value::Bool(true),
            LIT_FALSE => return Value::Bool(false),
            _ => {}
        }
        if let Some(ts) = parse_timestamp(literal) {
            return Value::Timestamp(ts);
        }
        if grammar::is_number(literal) {
            if let Some(n) = Number::from_literal(literal) {
                return Value::Number(n);
            }
        }
        if let Some((number, unit)) = grammar::split_unit(literal, self.options.unit_separator) {
            if let Some(n) = Number::from_literal(number) {
                return Value::UnitNumber(n, unit.to_string());
            }
        }
        Value::Text(literal.to_string())
    }
}

/// Calendar-invalid timestamps such as month 13 are left as text.
fn parse_timestamp(literal: &str) -> Option<DateTime<Utc>> {
    let [year, month, day, hour, min, sec] = grammar::split_timestamp(literal)?;
    Utc.with_ymd_and_hms(year as i32, month, day, hour, min, sec)
        .single()
}

/// Decodes `input` with the default options.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{decode, Value};
///
/// let line = decode("x=").unwrap();
/// assert_eq!(line.get("x"), Some(&Value::from("")));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if `input` is not a well-formed line.
pub fn decode(input: &str) -> Result<LineMap> {
    decode_with_options(input, &DecodeOptions::default())
}

/// Decodes `input` with custom options.
///
/// # Errors
///
/// Returns [`Error::Parse`] if `input` is not a well-formed line or nests
/// deeper than `options.max_depth`.
pub fn decode_with_options(input: &str, options: &DecodeOptions) -> Result<LineMap> {
    Decoder::new(input, options).decode()
}

/// Deserializes a `T` out of a [`Value`] tree.
///
/// Number-like text is not coerced, but numbers are accepted where a string is
/// expected. Timestamps are seen as their ISO-8601 text and unit tuples as a
/// `(number, unit)` pair.
///
/// # Errors
///
/// Returns an error if the tree does not have the shape `T` expects.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: LineMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::Text(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::Text(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None | Some(Value::Null) => Ok(()),
            Some(Value::Text(s)) if s.is_empty() => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Sequence(items)) => visitor.visit_seq(SeqDeserializer::new(items)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Mapping(map)) => visitor.visit_map(MapDeserializer::new(map)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}

/// Deserializer over an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::BigInt(bi)) => {
                if let Ok(u) = u64::try_from(&bi) {
                    visitor.visit_u64(u)
                } else if let Ok(i) = i128::try_from(&bi) {
                    visitor.visit_i128(i)
                } else if let Ok(u) = u128::try_from(&bi) {
                    visitor.visit_u128(u)
                } else {
                    visitor.visit_string(bi.to_string())
                }
            }
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::Text(s) => visitor.visit_string(s),
            Value::Timestamp(ts) => visitor.visit_string(ts.format(TIMESTAMP_FORMAT).to_string()),
            Value::UnitNumber(n, unit) => visitor.visit_seq(SeqDeserializer::new(vec![
                Value::Number(n),
                Value::Text(unit),
            ])),
            Value::Sequence(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Mapping(map) => visitor.visit_map(MapDeserializer::new(map)),
            Value::Opaque(o) => visitor.visit_string(registry::debug_text(&o)),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Number(n) => visitor.visit_string(n.to_string()),
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(ValueDeserializer::new(other)),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Text(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Mapping(map) if map.len() == 1 => {
                let mut iter = map.into_iter();
                match iter.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            _ => Err(Error::custom("Expected enum")),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::UnitSeparator;
    use serde::Deserialize;

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn test_decode_literals() {
        let line = decode("a=#t b=#f c=nil d=33 e=-3.5 f=1e3").unwrap();
        assert_eq!(line.get("a"), Some(&Value::Bool(true)));
        assert_eq!(line.get("b"), Some(&Value::Bool(false)));
        assert_eq!(line.get("c"), Some(&Value::Null));
        assert_eq!(line.get("d"), Some(&Value::from(33)));
        assert_eq!(line.get("e"), Some(&Value::from(-3.5)));
        assert_eq!(line.get("f"), Some(&Value::from(1000.0)));
    }

    #[test]
    fn test_decode_elision_markers() {
        let line = decode("x=[...] y={...}").unwrap();
        assert_eq!(line.get("x"), Some(&Value::Sequence(vec![text("...")])));

        let mut elided = LineMap::new();
        elided.insert("...", "");
        assert_eq!(line.get("y"), Some(&Value::Mapping(elided.clone())));

        assert_eq!(decode("...").unwrap(), elided);
    }

    #[test]
    fn test_decode_truncated_line() {
        let line = decode("a=aaa b=bbb ...").unwrap();
        let keys: Vec<_> = line.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "..."]);
    }

    #[test]
    fn test_decode_tolerates_trailing_whitespace() {
        assert_eq!(decode("x=foo ").unwrap().get("x"), Some(&text("foo")));
        assert_eq!(decode("x=foo\n").unwrap().get("x"), Some(&text("foo")));
        assert_eq!(decode("x=foo\r\n").unwrap().get("x"), Some(&text("foo")));
        assert_eq!(decode("  x=1   y=2").unwrap().len(), 2);
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_empty_values_and_keys() {
        assert_eq!(decode("x=").unwrap().get("x"), Some(&text("")));
        assert_eq!(decode("=").unwrap().get(""), Some(&text("")));
        let line = decode("x={a=} y=[a '' b]").unwrap();
        let inner = line.get("x").and_then(Value::as_mapping).unwrap();
        assert_eq!(inner.get("a"), Some(&text("")));
        assert_eq!(
            line.get("y"),
            Some(&Value::Sequence(vec![text("a"), text(""), text("b")]))
        );
        assert_eq!(decode("x=[]").unwrap().get("x"), Some(&Value::Sequence(vec![])));
        assert_eq!(
            decode("x={}").unwrap().get("x"),
            Some(&Value::Mapping(LineMap::new()))
        );
    }

    #[test]
    fn test_decode_quoted_strings() {
        let line = decode(r##"x="#t" bar="baz""##).unwrap();
        assert_eq!(line.get("x"), Some(&text("#t")));
        assert_eq!(line.get("bar"), Some(&text("baz")));

        assert_eq!(decode(r"x='foo\'bar'").unwrap().get("x"), Some(&text("foo'bar")));
        assert_eq!(decode(r#"x="foo\"bar""#).unwrap().get("x"), Some(&text("foo\"bar")));
        assert_eq!(decode(r#""\""=zzz"#).unwrap().get("\""), Some(&text("zzz")));
    }

    #[test]
    fn test_decode_restores_escapes() {
        let line = decode(r"'\r\n\t'='\r\n\t'").unwrap();
        assert_eq!(line.get("\r\n\t"), Some(&text("\r\n\t")));
        assert_eq!(decode(r"x='a\\b'").unwrap().get("x"), Some(&text(r"a\b")));
        assert_eq!(decode(r"x='a\qb'").unwrap().get("x"), Some(&text(r"a\qb")));
    }

    #[test]
    fn test_keys_are_not_typed() {
        let line = decode("3=4").unwrap();
        assert_eq!(line.get("3"), Some(&Value::from(4)));
    }

    #[test]
    fn test_decode_timestamp() {
        let line = decode("at=2013-07-12T21:33:47Z").unwrap();
        let expected = Utc.timestamp_opt(1373664827, 0).unwrap();
        assert_eq!(line.get("at"), Some(&Value::Timestamp(expected)));

        let line = decode("at='2013-13-12T21:33:47Z'").unwrap();
        assert!(line.get("at").unwrap().is_text());
    }

    #[test]
    fn test_decode_unit_tuples() {
        let line = decode("elapsed=31.9:ms commit=716f337").unwrap();
        assert_eq!(line.get("elapsed"), Some(&Value::unit(31.9, "ms")));
        assert_eq!(line.get("commit"), Some(&text("716f337")));

        let options = DecodeOptions::new().with_unit_separator(UnitSeparator::Empty);
        let line = decode_with_options("elapsed=3ms commit=716f337", &options).unwrap();
        assert_eq!(line.get("elapsed"), Some(&Value::unit(3, "ms")));
        assert_eq!(line.get("commit"), Some(&Value::unit(716, "f337")));
    }

    #[test]
    fn test_decode_big_integers() {
        let line = decode("n=123456789012345678901234567890").unwrap();
        assert!(matches!(
            line.get("n"),
            Some(Value::Number(Number::BigInt(_)))
        ));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let line = decode("a=1 b=2 a=3").unwrap();
        let pairs: Vec<_> = line
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_i64().unwrap()))
            .collect();
        assert_eq!(pairs, vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn test_parse_errors() {
        for input in [
            "x='unterminated",
            "x=[1 2",
            "x={a=1",
            "x=1]",
            "x=1}",
            "novalue",
            "a=b=c",
            "x=[1 =]",
            "x=\"a\"b",
        ] {
            let err = decode(input).unwrap_err();
            assert!(err.is_parse(), "{} should fail to parse", input);
        }
    }

    #[test]
    fn test_error_positions() {
        assert_eq!(decode("x='abc").unwrap_err().position(), Some(6));
        assert_eq!(decode("abc def").unwrap_err().position(), Some(3));
        assert_eq!(decode("x=1}").unwrap_err().position(), Some(3));
    }

    #[test]
    fn test_max_depth() {
        let options = DecodeOptions::new().with_max_depth(3);
        assert!(decode_with_options("a={b=[1]}", &options).is_ok());
        assert!(decode_with_options("a={b=[[1]]}", &options).is_err());

        let deep = format!("x={}1{}", "[".repeat(200), "]".repeat(200));
        assert!(decode(&deep).unwrap_err().is_parse());
    }

    #[test]
    fn test_from_value_struct() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Request {
            path: String,
            status: u16,
            elapsed: (f64, String),
            user: Option<String>,
        }

        let line = decode("path=/login status=200 elapsed=31.9:ms user=nil").unwrap();
        let req: Request = from_value(Value::Mapping(line)).unwrap();
        assert_eq!(
            req,
            Request {
                path: "/login".to_string(),
                status: 200,
                elapsed: (31.9, "ms".to_string()),
                user: None,
            }
        );
    }

    #[test]
    fn test_from_value_number_as_string() {
        #[derive(Deserialize)]
        struct Commit {
            sha: String,
        }

        let line = decode("sha=1234").unwrap();
        let commit: Commit = from_value(Value::Mapping(line)).unwrap();
        assert_eq!(commit.sha, "1234");
    }

    #[test]
    fn test_from_value_enums() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Event {
            Start,
            Stop(u32),
            Move { x: i32 },
        }

        let line = decode("a=Start b={Stop=3} c={Move={x=-1}}").unwrap();
        let get = |k: &str| from_value::<Event>(line.get(k).cloned().unwrap()).unwrap();
        assert_eq!(get("a"), Event::Start);
        assert_eq!(get("b"), Event::Stop(3));
        assert_eq!(get("c"), Event::Move { x: -1 });
    }
}
