//! Encoding of value trees into lines.
//!
//! This module provides the [`Encoder`], which writes a [`LineMap`] as one line
//! of text, and the [`ValueSerializer`], which turns any `T: Serialize` into a
//! [`Value`] tree.
//!
//! ## Overview
//!
//! The encoder never fails. It applies these rules:
//!
//! - **Literals**: `#t`, `#f`, `nil`, numbers, `2013-07-12T21:33:47Z`, `31.9:ms`
//! - **Quote minimization**: text is printed bare unless it would read back as
//!   something else
//! - **Depth bound**: containers past `max_depth` become `[...]` / `{...}`
//! - **Size bound**: trailing pairs past `max_bytesize` are replaced by `...`
//!
//! ## Usage
//!
//! ```rust
//! use serde_lines::{encode, encode_with_options, EncodeOptions, LineMap, Value};
//!
//! let mut line = LineMap::new();
//! line.insert("foo", "bar");
//! line.insert("bar", 33);
//! assert_eq!(encode(&line), "foo=bar bar=33");
//!
//! let options = EncodeOptions::new().with_max_bytesize(12);
//! assert_eq!(encode_with_options(&line, &options), "foo=bar ...");
//! ```

use crate::grammar::{
    self, BACKSLASH, DOUBLE_QUOTE, ELISION, LIT_FALSE, LIT_NIL, LIT_TRUE, SINGLE_QUOTE,
    TIMESTAMP_FORMAT,
};
use crate::options::{EncodeOptions, UnitSeparator};
use crate::registry;
use crate::value::Opaque;
use crate::{Error, LineMap, Number, Result, Value};
use serde::{ser, Serialize};

/// Writes [`LineMap`]s as lines according to a set of [`EncodeOptions`].
///
/// An encoder holds no state between calls, so one instance can encode any
/// number of lines.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{lines, EncodeOptions, Encoder};
///
/// let options = EncodeOptions::new().with_max_depth(1);
/// let encoder = Encoder::new(&options);
/// assert_eq!(encoder.encode(&lines!({ "x": [444] })), "x=[...]");
/// assert_eq!(encoder.encode(&lines!({ "x": { "y": 444 } })), "x={...}");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    options: &'a EncodeOptions,
}

impl<'a> Encoder<'a> {
    pub fn new(options: &'a EncodeOptions) -> Self {
        Encoder { options }
    }

    /// Encodes `line` without a line terminator.
    pub fn encode(&self, line: &LineMap) -> String {
        let budget = self.options.max_bytesize;
        if self.options.max_depth == 0 {
            return fit_elision(budget);
        }

        let pairs: Vec<String> = line
            .iter()
            .map(|(key, value)| {
                let mut pair = String::with_capacity(32);
                self.write_pair(&mut pair, key, value, self.options.max_depth - 1);
                pair
            })
            .collect();

        match budget {
            Some(max) if joined_len(&pairs) > max => truncate(&pairs, max),
            _ => pairs.join(" "),
        }
    }

    fn write_pairs(&self, out: &mut String, map: &LineMap, depth: usize) {
        if depth == 0 {
            out.push_str(ELISION);
            return;
        }
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            self.write_pair(out, key, value, depth - 1);
        }
    }

    fn write_pair(&self, out: &mut String, key: &str, value: &Value, depth: usize) {
        write_key(out, key);
        out.push('=');
        self.write_value(out, value, depth, false);
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize, in_sequence: bool) {
        match value {
            Value::Null => out.push_str(LIT_NIL),
            Value::Bool(true) => out.push_str(LIT_TRUE),
            Value::Bool(false) => out.push_str(LIT_FALSE),
            Value::Number(n) => out.push_str(&n.to_string()),
            Value::Text(s) => self.write_text(out, s, in_sequence),
            Value::Timestamp(ts) => out.push_str(&ts.format(TIMESTAMP_FORMAT).to_string()),
            Value::UnitNumber(n, unit) => self.write_unit(out, n, unit, depth, in_sequence),
            Value::Sequence(items) => self.write_sequence(out, items, depth),
            Value::Mapping(map) => {
                out.push('{');
                self.write_pairs(out, map, depth);
                out.push('}');
            }
            Value::Opaque(o) => self.write_opaque(out, o, depth, in_sequence),
        }
    }

    fn write_sequence(&self, out: &mut String, items: &[Value], depth: usize) {
        out.push('[');
        if depth == 0 {
            out.push_str(ELISION);
        } else {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                self.write_value(out, item, depth - 1, true);
            }
        }
        out.push(']');
    }

    #[inline]
    fn write_text(&self, out: &mut String, s: &str, in_sequence: bool) {
        if s.is_empty() {
            if in_sequence {
                out.push_str("''");
            }
        } else if grammar::is_literal_safe(s, self.options.unit_separator) {
            out.push_str(s);
        } else {
            write_quoted(out, s);
        }
    }

    /// A unit tuple is one literal when it can be read back as one; otherwise
    /// it degrades to a two-element sequence.
    fn write_unit(
        &self,
        out: &mut String,
        number: &Number,
        unit: &str,
        depth: usize,
        in_sequence: bool,
    ) {
        let finite = !matches!(number, Number::Float(f) if !f.is_finite());
        let literal = finite
            .then(|| grammar::unit_literal(&number.to_string(), unit, self.options.unit_separator))
            .flatten();
        if let Some(literal) = literal {
            out.push_str(&literal);
        } else {
            let pair = Value::Sequence(vec![
                Value::Number(number.clone()),
                Value::Text(unit.to_string()),
            ]);
            self.write_value(out, &pair, depth, in_sequence);
        }
    }

    fn write_opaque(&self, out: &mut String, opaque: &Opaque, depth: usize, in_sequence: bool) {
        match self.options.registry.render(opaque) {
            Some(rendered) => self.write_value(out, &rendered, depth, in_sequence),
            None => self.write_text(out, &registry::debug_text(opaque), in_sequence),
        }
    }
}

#[inline]
fn write_key(out: &mut String, key: &str) {
    if grammar::is_key_safe(key) {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

fn write_quoted(out: &mut String, s: &str) {
    let quote = if s.contains(SINGLE_QUOTE) {
        DOUBLE_QUOTE
    } else {
        SINGLE_QUOTE
    };
    out.push(quote);
    for ch in s.chars() {
        match ch {
            BACKSLASH => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push(BACKSLASH);
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Quotes `s` the way the encoder quotes text: single quotes unless `s`
/// contains one, with `\`, the chosen quote and line breaks escaped.
///
/// # Examples
///
/// ```rust
/// use serde_lines::ser::escape;
///
/// assert_eq!(escape("a b"), "'a b'");
/// assert_eq!(escape("foo's"), "\"foo's\"");
/// assert_eq!(escape("\r\n\t"), r"'\r\n\t'");
/// ```
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    write_quoted(&mut out, s);
    out
}

fn joined_len(pairs: &[String]) -> usize {
    pairs.iter().map(String::len).sum::<usize>() + pairs.len().saturating_sub(1)
}

/// Keeps the longest prefix of `pairs` that still fits `max` bytes once
/// followed by ` ...`.
fn truncate(pairs: &[String], max: usize) -> String {
    let mut kept = 0;
    let mut len = 0;
    for pair in pairs {
        let next = if kept == 0 { pair.len() } else { len + 1 + pair.len() };
        if next + 1 + ELISION.len() > max {
            break;
        }
        len = next;
        kept += 1;
    }

    if kept == 0 {
        return fit_elision(Some(max));
    }
    let mut out = pairs[..kept].join(" ");
    out.push(' ');
    out.push_str(ELISION);
    out
}

fn fit_elision(budget: Option<usize>) -> String {
    match budget {
        Some(max) if max < ELISION.len() => String::new(),
        _ => ELISION.to_string(),
    }
}

/// Encodes `line` with the default options.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{encode, lines};
///
/// assert_eq!(encode(&lines!({ "x": "", "y": "4" })), "x= y='4'");
/// ```
#[must_use]
pub fn encode(line: &LineMap) -> String {
    encode_with_options(line, &EncodeOptions::default())
}

/// Encodes `line` with custom options.
#[must_use]
pub fn encode_with_options(line: &LineMap, options: &EncodeOptions) -> String {
    Encoder::new(options).encode(line)
}

/// Serializer whose output is a [`Value`] tree.
///
/// Map keys that are not strings are turned into their literal text, so
/// `{3: 4}` becomes the pair `3=4`. Enum variants carrying data become
/// single-pair mappings.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: LineMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

fn wrap_variant(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => {
            let mut map = LineMap::with_capacity(1);
            map.insert(name, value);
            Value::Mapping(map)
        }
        None => value,
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::from(num_bigint::BigInt::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Sequence(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(wrap_variant(Some(variant), to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(len: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(len),
            variant,
        }
    }
}

impl SerializeMap {
    fn new(len: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: LineMap::with_capacity(len),
            current_key: None,
            variant,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(wrap_variant(self.variant, Value::Sequence(self.vec)))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key_text(to_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(wrap_variant(self.variant, Value::Mapping(self.map)))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        ser::SerializeMap::end(self)
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        ser::SerializeMap::end(self)
    }
}

/// Literal text of a map key. Containers cannot be keys.
fn key_text(key: Value) -> Result<String> {
    match key {
        Value::Text(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok(LIT_TRUE.to_string()),
        Value::Bool(false) => Ok(LIT_FALSE.to_string()),
        Value::Null => Ok(LIT_NIL.to_string()),
        Value::Timestamp(ts) => Ok(ts.format(TIMESTAMP_FORMAT).to_string()),
        Value::UnitNumber(n, unit) => Ok(format!("{}{}{}", n, UnitSeparator::Colon.as_str(), unit)),
        Value::Sequence(_) | Value::Mapping(_) | Value::Opaque(_) => {
            Err(Error::unsupported_type("map keys must be literals"))
        }
    }
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Errors
///
/// Returns an error if a map key is a sequence or a mapping, or if the
/// `Serialize` impl itself fails.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}
