//! Dynamic value tree for Lines data.
//!
//! A line is a [`LineMap`] of keys to [`Value`]s. The encoder turns the tree into
//! text, and the decoder builds a new tree from text.
//!
//! ## Core Types
//!
//! - [`Value`]: null, bool, number, text, timestamp, unit tuple, sequence, mapping, opaque
//! - [`Number`]: integers (with a big-integer fallback) and floats
//! - [`Opaque`]: any other Rust value, rendered through the
//!   [`ExtensionRegistry`](crate::ExtensionRegistry) or a debug fallback
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_lines::{lines, Value};
//! use std::time::Duration;
//!
//! let null = Value::Null;
//! let text = Value::from("hello");
//! let elapsed = Value::from(Duration::from_millis(3));
//! assert_eq!(elapsed, Value::unit(3, "ms"));
//!
//! let line = Value::from(lines!({ "msg": "hello", "count": 3 }));
//! assert!(line.is_mapping());
//! ```

use crate::grammar::{ELISION, TIMESTAMP_FORMAT};
use crate::LineMap;
use crate::registry;
use chrono::{DateTime, NaiveDate, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Any value that can appear in a line.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{Number, Value};
///
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::Text("hello".to_string());
///
/// assert!(Value::Null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_text());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    /// An instant, always written in UTC with second precision.
    Timestamp(DateTime<Utc>),
    /// A number and its unit tag, written as one literal such as `31.9:ms`.
    UnitNumber(Number, String),
    Sequence(Vec<Value>),
    Mapping(LineMap),
    Opaque(Opaque),
}

/// A numeric value.
///
/// Integers that do not fit in `i64` are kept as [`BigInt`] so they survive a
/// round-trip.
///
/// # Examples
///
/// ```rust
/// use serde_lines::Number;
///
/// assert_eq!(Number::Integer(42).to_string(), "42");
/// assert_eq!(Number::Float(10e3).to_string(), "10000.0");
/// assert_eq!(Number::Float(1e16).to_string(), "1e16");
/// assert_eq!(Number::Float(f64::NAN).to_string(), "NaN");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    BigInt(BigInt),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::BigInt(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `Some(i64)` for integers in range and for whole floats in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::BigInt(bi) => i64::try_from(bi).ok(),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts to `f64`, losing precision for very large integers.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::BigInt(bi) => bi.to_string().parse().unwrap_or(f64::NAN),
            Number::Float(f) => *f,
        }
    }

    /// Parses a numeric literal: integer text without `.` or exponent, float
    /// otherwise. Integers outside the `i64` range become [`Number::BigInt`].
    pub(crate) fn from_literal(s: &str) -> Option<Number> {
        if s.contains(['.', 'e', 'E']) {
            s.parse().ok().map(Number::Float)
        } else if let Ok(i) = s.parse::<i64>() {
            Some(Number::Integer(i))
        } else {
            s.parse().ok().map(Number::BigInt)
        }
    }
}

/// Canonical text: integers without a decimal point, finite floats in their
/// shortest round-trip form (always with a `.` or an exponent), and the words
/// `NaN`, `Infinity`, `-Infinity` for the rest.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::BigInt(bi) => write!(f, "{}", bi),
            Number::Float(fl) if fl.is_nan() => write!(f, "NaN"),
            Number::Float(fl) if fl.is_infinite() && *fl > 0.0 => write!(f, "Infinity"),
            Number::Float(fl) if fl.is_infinite() => write!(f, "-Infinity"),
            Number::Float(fl) => write!(f, "{:?}", fl),
        }
    }
}

macro_rules! number_from_small_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(value as i64)
                }
            }
        )*
    };
}

number_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(BigInt::from(value)),
        }
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number::from(value as u64)
    }
}

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(BigInt::from(value)),
        }
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        match i64::try_from(&value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(value),
        }
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Object-safe bound for values carried by [`Opaque`].
pub trait OpaqueObject: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> OpaqueObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A host value with no built-in line representation.
///
/// The encoder renders it with the first matching renderer of the
/// [`ExtensionRegistry`](crate::ExtensionRegistry), or with its `Debug` text
/// when none matches. Two opaques are equal only if they share the same
/// allocation.
///
/// # Examples
///
/// ```rust
/// use serde_lines::Opaque;
///
/// #[derive(Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let opaque = Opaque::new(Point { x: 3, y: 5 });
/// assert!(opaque.is::<Point>());
/// assert_eq!(opaque.downcast_ref::<Point>().map(|p| p.x), Some(3));
/// ```
#[derive(Clone)]
pub struct Opaque {
    inner: Arc<dyn OpaqueObject>,
    type_name: &'static str,
}

impl Opaque {
    pub fn new<T: OpaqueObject>(value: T) -> Self {
        Opaque {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Name of the wrapped type, as given by [`std::any::type_name`].
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn as_any(&self) -> &dyn Any {
        (*self.inner).as_any()
    }

    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Address of the shared allocation, used in fallback tags.
    #[must_use]
    pub fn address(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl Value {
    /// Builds a unit tuple such as `31.9:ms`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::{Number, Value};
    ///
    /// let v = Value::unit(31.9, "ms");
    /// assert_eq!(v, Value::UnitNumber(Number::Float(31.9), "ms".to_string()));
    /// ```
    pub fn unit(number: impl Into<Number>, unit: impl Into<String>) -> Self {
        Value::UnitNumber(number.into(), unit.into())
    }

    /// Wraps any debuggable value as an [`Opaque`].
    pub fn opaque<T: OpaqueObject>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_unit_number(&self) -> bool {
        matches!(self, Value::UnitNumber(..))
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self, Value::Opaque(_))
    }

    /// Returns `true` for what the decoder produces from `[...]` and `{...}`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::decode;
    ///
    /// let line = decode("x=[...] y={...} z=[a]").unwrap();
    /// assert!(line.get("x").unwrap().is_elision());
    /// assert!(line.get("y").unwrap().is_elision());
    /// assert!(!line.get("z").unwrap().is_elision());
    /// ```
    #[must_use]
    pub fn is_elision(&self) -> bool {
        match self {
            Value::Sequence(items) => {
                items.len() == 1 && items[0].as_str() == Some(ELISION)
            }
            Value::Mapping(map) => {
                map.len() == 1 && map.get(ELISION).and_then(Value::as_str) == Some("")
            }
            _ => false,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is text, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// If the value is a unit tuple, returns its number and unit.
    #[inline]
    #[must_use]
    pub fn as_unit_number(&self) -> Option<(&Number, &str)> {
        match self {
            Value::UnitNumber(n, unit) => Some((n, unit)),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&LineMap> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Value::Opaque(o) => Some(o),
            _ => None,
        }
    }

    /// Visits every value depth-first, children before their container.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::{lines, Value};
    ///
    /// let value = Value::from(lines!({ "a": [1, 2], "b": "x" }));
    /// let mut count = 0;
    /// value.walk(&mut |_| count += 1);
    /// assert_eq!(count, 5);
    /// ```
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&Value),
    {
        match self {
            Value::Sequence(items) => {
                for item in items {
                    item.walk(f);
                }
            }
            Value::Mapping(map) => {
                for value in map.values() {
                    value.walk(f);
                }
            }
            _ => {}
        }
        f(self);
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(n, serializer),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Timestamp(ts) => {
                serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
            }
            Value::UnitNumber(n, unit) => {
                use serde::ser::SerializeTuple;
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(&Value::Number(n.clone()))?;
                tuple.serialize_element(unit)?;
                tuple.end()
            }
            Value::Sequence(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(map) => map.serialize(serializer),
            Value::Opaque(o) => serializer.serialize_str(&registry::debug_text(o)),
        }
    }
}

fn serialize_number<S>(n: &Number, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match n {
        Number::Integer(i) => serializer.serialize_i64(*i),
        Number::BigInt(bi) => match i128::try_from(bi) {
            Ok(i) => serializer.serialize_i128(i),
            Err(_) => serializer.collect_str(bi),
        },
        Number::Float(f) => serializer.serialize_f64(*f),
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid Lines value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from(BigInt::from(value))))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::Text(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Sequence(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = LineMap::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    values.insert(key, value);
                }
                Ok(Value::Mapping(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match &value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| crate::Error::custom(format!("cannot convert {} to i64", n))),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected text, found {:?}",
                value
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, i128, u8, u16, u32, u64, usize, f32, f64, BigInt);

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

/// Dates have no literal of their own; they become ISO text such as `1968-03-07`,
/// which stays bare on the line.
impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Text(value.format("%Y-%m-%d").to_string())
    }
}

/// Durations become millisecond unit tuples: whole milliseconds as integers,
/// anything finer as a float.
impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        let nanos = value.as_nanos();
        let number = if nanos % 1_000_000 == 0 {
            Number::from(BigInt::from(nanos / 1_000_000))
        } else {
            Number::Float(nanos as f64 / 1e6)
        };
        Value::UnitNumber(number, "ms".to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<LineMap> for Value {
    fn from(value: LineMap) -> Self {
        Value::Mapping(value)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Opaque(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tryfrom_i64() {
        let value = Value::Number(Number::Integer(42));
        assert_eq!(i64::try_from(value).unwrap(), 42);

        let value = Value::Number(Number::Float(42.0));
        assert_eq!(i64::try_from(value).unwrap(), 42);

        assert!(i64::try_from(Value::from("test")).is_err());
        assert!(i64::try_from(Value::from(1.5)).is_err());
    }

    #[test]
    fn test_tryfrom_text_and_bool() {
        assert_eq!(String::try_from(Value::from("hello")).unwrap(), "hello");
        assert!(String::try_from(Value::from(1)).is_err());
        assert!(bool::try_from(Value::from(true)).unwrap());
        assert!(bool::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Number::Integer(-1).to_string(), "-1");
        assert_eq!(Number::Float(10e3).to_string(), "10000.0");
        assert_eq!(Number::Float(31.9).to_string(), "31.9");
        assert_eq!(Number::Float(1e-7).to_string(), "1e-7");
        assert_eq!(Number::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Number::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(
            Number::BigInt(big).to_string(),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn test_number_from_literal() {
        assert_eq!(Number::from_literal("33"), Some(Number::Integer(33)));
        assert_eq!(Number::from_literal("-3.3"), Some(Number::Float(-3.3)));
        assert_eq!(Number::from_literal("1e3"), Some(Number::Float(1000.0)));
        assert!(matches!(
            Number::from_literal("99999999999999999999"),
            Some(Number::BigInt(_))
        ));
    }

    #[test]
    fn test_u64_beyond_i64_is_bigint() {
        assert!(matches!(Number::from(u64::MAX), Number::BigInt(_)));
        assert_eq!(Number::from(7u64), Number::Integer(7));
    }

    #[test]
    fn test_from_duration() {
        assert_eq!(
            Value::from(Duration::from_millis(3)),
            Value::unit(3, "ms")
        );
        assert_eq!(
            Value::from(Duration::from_micros(31_900)),
            Value::unit(31.9, "ms")
        );
    }

    #[test]
    fn test_from_dates() {
        let date = NaiveDate::from_ymd_opt(1968, 3, 7).unwrap();
        assert_eq!(Value::from(date), Value::from("1968-03-07"));

        let ts = Utc.timestamp_opt(1337, 0).unwrap();
        assert_eq!(Value::from(ts), Value::Timestamp(ts));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_opaque_identity() {
        let a = Opaque::new(vec![1, 2, 3]);
        let b = a.clone();
        let c = Opaque::new(vec![1, 2, 3]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(format!("{:?}", a), "[1, 2, 3]");
        assert!(a.type_name().contains("Vec"));
    }

    #[test]
    fn test_walk_visits_children_first() {
        let mut inner = LineMap::new();
        inner.insert("y", 1);
        let value = Value::Sequence(vec![Value::from("a"), Value::Mapping(inner)]);

        let mut seen = Vec::new();
        value.walk(&mut |v| {
            seen.push(match v {
                Value::Text(_) => "text",
                Value::Number(_) => "number",
                Value::Mapping(_) => "mapping",
                Value::Sequence(_) => "sequence",
                _ => "other",
            })
        });
        assert_eq!(seen, vec!["text", "number", "mapping", "sequence"]);
    }

    #[test]
    fn test_serialize_to_json() {
        let mut map = LineMap::new();
        map.insert("at", Utc.timestamp_opt(1373664827, 0).unwrap());
        map.insert("elapsed", Value::unit(31.9, "ms"));
        map.insert("ok", true);
        let json = serde_json::to_string(&Value::Mapping(map)).unwrap();
        assert_eq!(
            json,
            r#"{"at":"2013-07-12T21:33:47Z","elapsed":[31.9,"ms"],"ok":true}"#
        );
    }
}
