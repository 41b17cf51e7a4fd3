//! Lines Format Reference
//!
//! This module documents the line format as implemented by this library.
//!
//! # Overview
//!
//! A line is a sequence of `key=value` pairs separated by single spaces. It is
//! UTF-8, never contains a raw newline, and is written without a terminator:
//! sinks add one.
//!
//! ```text
//! at=2013-07-12T21:33:47Z pri=info msg='user signed in' user={id=3 admin=#f} elapsed=31.9:ms
//! ```
//!
//! ## Design Philosophy
//!
//! - **People first**: bare words wherever they cannot be misread
//! - **Never fail**: every value has a representation, even if approximate
//! - **Bounded**: depth and length limits keep one log call from flooding a sink
//! - **Units stay with numbers**: `3:ms` instead of `elapsed_ms=3`
//!
//! # Grammar
//!
//! ```text
//! line     = pairs
//! pairs    = [ pair *( " " pair ) ] [ " ..." ] | "..."
//! pair     = key "=" value
//! key      = quoted | bare
//! value    = mapping | sequence | quoted | literal | ""
//! mapping  = "{" pairs "}"
//! sequence = "[" [ value *( " " value ) ] "]"
//! quoted   = "'" *( char | escape ) "'" | '"' *( char | escape ) '"'
//! ```
//!
//! Keys are never typed: in `3=4` the key is the text `3` and the value the
//! number `4`.
//!
//! # Literals
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `nil` | `user=nil` |
//! | Boolean | `#t` / `#f` | `ok=#t` |
//! | Integer | `-?(0\|[1-9][0-9]*)` | `count=42` |
//! | Float | integer with `.digits` and/or exponent | `ratio=0.25`, `big=1e16` |
//! | Timestamp | `YYYY-MM-DDTHH:MM:SSZ`, always UTC | `at=2013-07-12T21:33:47Z` |
//! | Unit tuple | number, separator, unit | `elapsed=31.9:ms` |
//! | Text | anything else | `commit=716f337` |
//!
//! Floats are written in their shortest round-trip form and always carry a `.`
//! or an exponent, so `10000.0` stays a float. `NaN`, `Infinity` and
//! `-Infinity` are written as bare words and read back as text. Integers past
//! the 64-bit range are kept exactly.
//!
//! ## Unit Tuples
//!
//! A unit starts with a letter, `%` or `_`. The separator is set by
//! [`UnitSeparator`](crate::UnitSeparator) and must be the same on both ends:
//!
//! | Separator | Written | Note |
//! |-----------|---------|------|
//! | `Colon` (default) | `3:ms` | bare text never contains `:`, so no ambiguity |
//! | `Empty` | `3ms` | hex-like words such as `716f337` read back as unit tuples |
//!
//! # Strings
//!
//! Text is written bare unless it:
//!
//! - contains whitespace or one of `' " = : { } [ ]`
//! - is one of `nil`, `#t`, `#f`, `...`
//! - matches the number pattern, or the unit-tuple pattern for the active separator
//!
//! Quoted text uses single quotes, or double quotes when it contains a single
//! quote. Inside quotes these escapes are written and read:
//!
//! ```text
//! \\  - backslash
//! \'  - single quote (inside '...')
//! \"  - double quote (inside "...")
//! \n  - newline
//! \r  - carriage return
//! \t  - tab
//! ```
//!
//! Any other backslash pair is kept as is.
//!
//! The empty string is written as nothing at all after `=` (`x=`), and as `''`
//! inside a sequence so the element is not lost.
//!
//! # Bounds
//!
//! ## Depth
//!
//! The top-level mapping is level one. A container that would sit deeper than
//! `max_depth` (default 4) is replaced by an elision marker:
//!
//! ```text
//! x=[...]      a sequence that was too deep
//! x={...}      a mapping that was too deep
//! ```
//!
//! With `max_depth = 0` the whole line is `...`.
//!
//! ## Size
//!
//! A line is kept whole while it fits in `max_bytesize`.
//! Otherwise trailing top-level pairs are dropped and a final `...` is
//! appended; the result never exceeds the budget:
//!
//! ```text
//! a=aaa b=bbb c=cccc     budget 18 and up
//! a=aaa b=bbb ...        budget 15..=17
//! a=aaa ...              budget 9..=14
//! ...                    budget 3..=8
//! ```
//!
//! A budget below 3 bytes yields an empty line.
//!
//! # Decoding Elisions
//!
//! Elisions are a lossy boundary. The decoder returns:
//!
//! | Text | Value |
//! |------|-------|
//! | `[...]` | a one-element sequence holding the text `...` |
//! | `{...}` | a mapping with the single pair `"..." => ""` |
//! | trailing ` ...` | a final pair `"..." => ""` |
//!
//! # Decoding Leniency
//!
//! - runs of spaces between pairs and between sequence elements
//! - leading spaces, trailing whitespace including `\n` or `\r\n`
//! - duplicate keys: the last value wins, at the position of the first
//!
//! Anything else that does not fit the grammar is a parse error carrying the
//! byte position of the offending character.
//!
//! # Opaque Values
//!
//! A value with no built-in representation is rendered by the first matching
//! entry of the [`ExtensionRegistry`](crate::ExtensionRegistry), or as its
//! `Debug` text when none matches. A renderer that fails is replaced by a tag
//! such as `#<app::Socket:0x55d0c1a2b3c0>`.
//!
//! # Rust-Specific Serialization
//!
//! - **Structs and maps**: mappings; non-string map keys become their literal text
//! - **Unit variants**: text: `status=Active`
//! - **Newtype, tuple and struct variants**: single-pair mappings: `event={Stop=3}`
//! - **Other top-level values**: logged under `msg`: `msg=42`
//!
//! # Limitations
//!
//! - **Round-trips**: exact only for null, booleans, integers, literal-safe text
//!   and timestamps within the bounds
//! - **Sub-second time**: timestamps are written with second precision
//! - **Multi-line records**: not supported; newlines are always escaped

// This module contains only documentation; no implementation code
