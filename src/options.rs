//! Configuration options for encoding and decoding.
//!
//! - [`EncodeOptions`]: depth and size bounds, unit separator, extension registry
//! - [`DecodeOptions`]: nesting limit and unit separator
//! - [`UnitSeparator`]: how a number and its unit tag are joined
//!
//! Options are plain values passed into each call. Nothing here is global.
//!
//! ## Examples
//!
//! ```rust
//! use serde_lines::{encode_with_options, lines, EncodeOptions};
//!
//! let line = lines!({ "x": { "y": 444 } });
//! let options = EncodeOptions::new().with_max_depth(1);
//! assert_eq!(encode_with_options(&line, &options), "x={...}");
//! ```

use crate::registry::ExtensionRegistry;

/// Default nesting bound of the encoder.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Byte budget used by [`EncodeOptions::bounded`].
pub const DEFAULT_MAX_BYTESIZE: usize = 4096;

/// Default nesting bound of the decoder.
pub const DEFAULT_DECODE_MAX_DEPTH: usize = 100;

/// How a unit tuple is written: `3:ms` or `3ms`.
///
/// The encoder and the decoder must agree on this. `Colon` is the default
/// because a bare text value never contains `:`, so no word can be mistaken for
/// a unit tuple. With `Empty`, a word like `716f337` reads back as
/// `UnitNumber(716, "f337")`.
///
/// # Examples
///
/// ```rust
/// use serde_lines::UnitSeparator;
///
/// assert_eq!(UnitSeparator::Colon.as_str(), ":");
/// assert_eq!(UnitSeparator::Empty.as_str(), "");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UnitSeparator {
    #[default]
    Colon,
    Empty,
}

impl UnitSeparator {
    /// Returns the text placed between the number and the unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            UnitSeparator::Colon => ":",
            UnitSeparator::Empty => "",
        }
    }
}

/// Configuration for the encoder.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{EncodeOptions, UnitSeparator};
///
/// let options = EncodeOptions::new()
///     .with_max_depth(2)
///     .with_max_bytesize(1024)
///     .with_unit_separator(UnitSeparator::Empty);
/// assert_eq!(options.max_depth, 2);
/// assert_eq!(options.max_bytesize, Some(1024));
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Containers nested deeper than this are replaced by `[...]` / `{...}`.
    pub max_depth: usize,
    /// Upper bound on the encoded line length in bytes.
    pub max_bytesize: Option<usize>,
    pub unit_separator: UnitSeparator,
    /// Renderers for [`Opaque`](crate::Opaque) values.
    pub registry: ExtensionRegistry,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_bytesize: None,
            unit_separator: UnitSeparator::default(),
            registry: ExtensionRegistry::default(),
        }
    }
}

impl EncodeOptions {
    /// Creates default options: depth 4, no size bound, `:` unit separator,
    /// empty registry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::EncodeOptions;
    ///
    /// let options = EncodeOptions::new();
    /// assert_eq!(options.max_depth, 4);
    /// assert!(options.max_bytesize.is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with a 4096 byte budget, suitable for log sinks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::EncodeOptions;
    ///
    /// assert_eq!(EncodeOptions::bounded().max_bytesize, Some(4096));
    /// ```
    #[must_use]
    pub fn bounded() -> Self {
        EncodeOptions {
            max_bytesize: Some(DEFAULT_MAX_BYTESIZE),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the byte budget. Pairs that do not fit are dropped from the tail and
    /// replaced by a trailing `...`.
    #[must_use]
    pub fn with_max_bytesize(mut self, max_bytesize: usize) -> Self {
        self.max_bytesize = Some(max_bytesize);
        self
    }

    /// Removes the byte budget.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_bytesize = None;
        self
    }

    #[must_use]
    pub fn with_unit_separator(mut self, separator: UnitSeparator) -> Self {
        self.unit_separator = separator;
        self
    }

    /// Replaces the extension registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ExtensionRegistry) -> Self {
        self.registry = registry;
        self
    }
}

/// Configuration for the decoder.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{decode_with_options, DecodeOptions};
///
/// let options = DecodeOptions::new().with_max_depth(1);
/// assert!(decode_with_options("a={b={c=1}}", &options).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Containers nested deeper than this are a parse error.
    pub max_depth: usize,
    pub unit_separator: UnitSeparator,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_DECODE_MAX_DEPTH,
            unit_separator: UnitSeparator::default(),
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_unit_separator(mut self, separator: UnitSeparator) -> Self {
        self.unit_separator = separator;
        self
    }
}
