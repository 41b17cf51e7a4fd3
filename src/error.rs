//! Error types for the Lines codec.
//!
//! Encoding never fails, so every variant here comes from one of three places:
//!
//! - **Decoding**: malformed line text, reported as [`Error::Parse`] with the byte
//!   position of the offending character
//! - **Serde conversion**: a `Serialize`/`Deserialize` impl that rejects a value
//! - **Sinks**: I/O failures while writing a line
//!
//! Every error the crate produces is an [`Error`], so callers can tell Lines
//! failures apart from unrelated ones with a single match.
//!
//! ## Examples
//!
//! ```rust
//! use serde_lines::{decode, Error};
//!
//! let err = decode("x='unterminated").unwrap_err();
//! assert!(err.is_parse());
//! assert_eq!(err.position(), Some(15));
//! ```

use std::fmt;
use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed line text. `position` is a byte offset into the input.
    #[error("Parse error at position {position}: {msg}")]
    Parse { position: usize, msg: String },

    /// IO error while writing to a sink or reading from a reader
    #[error("IO error: {0}")]
    Io(String),

    /// A value shape the serde bridge cannot represent
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error, usually raised by a serde impl
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error at `position`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::Error;
    ///
    /// let err = Error::parse(4, "unterminated quoted string");
    /// assert!(err.to_string().contains("position 4"));
    /// ```
    pub fn parse(position: usize, msg: &str) -> Self {
        Error::Parse {
            position,
            msg: msg.to_string(),
        }
    }

    /// Creates a parse error naming the expected token and the character found instead.
    ///
    /// `found` is `None` at end of input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::Error;
    ///
    /// let err = Error::expected(3, "'='", Some('}'));
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Parse error at position 3: expected '=' but got '}'"
    /// );
    /// ```
    pub fn expected(position: usize, expected: &str, found: Option<char>) -> Self {
        let found = match found {
            Some(ch) => format!("{:?}", ch),
            None => "end of input".to_string(),
        };
        Error::Parse {
            position,
            msg: format!("expected {} but got {}", expected, found),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if this error came from the decoder.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Byte position of a parse error, `None` for every other kind.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Error::Parse { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
