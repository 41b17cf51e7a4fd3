//! # serde_lines
//!
//! An encoder and decoder for **Lines**, a structured log format where every
//! record is one line of `key=value` pairs.
//!
//! ## What is Lines?
//!
//! Lines is meant to be read by people first and by programs second:
//!
//! ```text
//! at=2013-07-12T21:33:47Z commit=716f337 elapsed=31.9:ms user={id=3 name='Jo Ann'} tags=[web auth]
//! ```
//!
//! Bare words are literals (`#t`, `#f`, `nil`, numbers, timestamps, unit
//! tuples) or plain text. Quotes appear only where a string would otherwise be
//! misread. Nesting is bounded, and so is the line length, so a log call can
//! never produce an unbounded line.
//!
//! ## Key Features
//!
//! - **Never fails to encode**: values with no representation degrade to a textual
//!   stand-in instead of an error
//! - **Bounded output**: `max_depth` elides deep containers, `max_bytesize` drops
//!   trailing pairs
//! - **Typed literals**: numbers, timestamps and `31.9:ms` unit tuples come back typed
//! - **Serde Compatible**: any `#[derive(Serialize)]` type can be logged, any
//!   `#[derive(Deserialize)]` type can be read back
//! - **Extension renderers**: teach the encoder about your own types
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_lines = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Encoding and Decoding
//!
//! ```rust
//! use serde_lines::{decode, encode, lines, Value};
//!
//! let line = lines!({ "foo": "bar", "bar": 33, "tags": ["a", "b c"] });
//! let text = encode(&line);
//! assert_eq!(text, "foo=bar bar=33 tags=[a 'b c']");
//!
//! let back = decode(&text).unwrap();
//! assert_eq!(back.get("bar"), Some(&Value::from(33)));
//! ```
//!
//! ### With Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_lines::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Request {
//!     path: String,
//!     status: u16,
//!     cached: bool,
//! }
//!
//! let req = Request { path: "/login".to_string(), status: 200, cached: false };
//! let text = to_string(&req).unwrap();
//! assert_eq!(text, "path=/login status=200 cached=#f");
//!
//! let back: Request = from_str(&text).unwrap();
//! assert_eq!(req, back);
//! ```
//!
//! ### Logging
//!
//! ```rust
//! use serde_lines::{lines, Logger, WriterSink};
//!
//! let logger = Logger::new(WriterSink::new(Vec::new()));
//! logger.set_global("app", "web");
//! logger.log_msg("started", lines!({ "port": 8080 })).unwrap();
//! ```
//!
//! ## Round-trips
//!
//! `decode(encode(m)) == m` holds for mappings of null, booleans, integers,
//! text and timestamps within the configured bounds. Other values come back
//! approximately: elided containers decode to `[...]` / `{...}` markers, and
//! opaque values come back as text.
//!
//! ## Format Specification
//!
//! See the [`format`] module for the full grammar.

pub mod de;
pub mod error;
pub mod format;
pub mod grammar;
pub mod logger;
pub mod macros;
pub mod map;
pub mod options;
pub mod registry;
pub mod ser;
pub mod sink;
pub mod value;

pub use de::{decode, decode_with_options, from_value, Decoder, ValueDeserializer};
pub use error::{Error, Result};
pub use logger::{Level, Logger};
pub use map::LineMap;
pub use options::{DecodeOptions, EncodeOptions, UnitSeparator};
pub use registry::{ExtensionRegistry, RenderError};
pub use ser::{encode, encode_with_options, to_value, Encoder, ValueSerializer};
pub use sink::{Period, RollingFile, Sink, WriterSink};
pub use value::{Number, Opaque, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a line.
///
/// A value that is not a map or struct is logged under the `msg` key.
///
/// # Examples
///
/// ```rust
/// use serde_lines::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x=1 y=2");
/// assert_eq!(to_string("hello world").unwrap(), "msg='hello world'");
/// ```
///
/// # Errors
///
/// Returns an error if the `Serialize` impl fails or uses a container as a map key.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a line with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{to_string_with_options, EncodeOptions};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("a", "aaa");
/// map.insert("b", "bbb");
/// let options = EncodeOptions::new().with_max_bytesize(10);
/// assert_eq!(to_string_with_options(&map, &options).unwrap(), "a=aaa ...");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted to a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let line = match to_value(value)? {
        Value::Mapping(map) => map,
        other => {
            let mut map = LineMap::with_capacity(1);
            map.insert("msg", other);
            map
        }
    };
    Ok(encode_with_options(&line, options))
}

/// Serialize any `T: Serialize` as a line into a writer, without a terminator.
///
/// # Examples
///
/// ```rust
/// use serde_lines::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x=1 y=2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let line = to_string(value)?;
    writer.write_all(line.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from a line.
///
/// # Examples
///
/// ```rust
/// use serde_lines::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x=1 y=2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not a well-formed line or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(Value::Mapping(decode(s)?))
}

/// Deserialize an instance of type `T` from an I/O stream holding one line.
///
/// # Examples
///
/// ```rust
/// use serde_lines::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x=1 y=2\n")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not a well-formed line, or
/// the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Deploy {
        at: DateTime<Utc>,
        commit: String,
        tags: Vec<String>,
        owner: Option<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let line = to_string(&point).unwrap();
        let point_back: Point = from_str(&line).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_deploy() {
        let deploy = Deploy {
            at: Utc.timestamp_opt(1373664827, 0).unwrap(),
            commit: "716f337".to_string(),
            tags: vec!["web".to_string(), "hot fix".to_string()],
            owner: None,
        };

        let line = to_string(&deploy).unwrap();
        assert_eq!(
            line,
            "at='2013-07-12T21:33:47Z' commit=716f337 tags=[web 'hot fix'] owner=nil"
        );
        let back: Deploy = from_str(&line).unwrap();
        assert_eq!(deploy, back);
    }

    #[test]
    fn test_non_mapping_is_wrapped_as_msg() {
        assert_eq!(to_string(&42).unwrap(), "msg=42");
        assert_eq!(to_string(&vec![1, 2]).unwrap(), "msg=[1 2]");
    }

    #[test]
    fn test_from_str_reports_parse_errors() {
        let err = from_str::<Point>("x=1 y=").unwrap_err();
        assert!(!err.is_parse());

        let err = from_str::<Point>("x=[1").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        match value {
            Value::Mapping(map) => {
                assert_eq!(map.get("x"), Some(&Value::Number(Number::Integer(1))));
                assert_eq!(map.get("y"), Some(&Value::Number(Number::Integer(2))));
            }
            _ => panic!("Expected mapping"),
        }
    }
}
