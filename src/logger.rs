//! A small logging facade on top of the encoder.
//!
//! A [`Logger`] merges its global fields, the message, the call's fields and
//! its context into one [`LineMap`], encodes it and hands the line to a
//! [`Sink`]. Globals are shared between a logger and every context derived
//! from it.
//!
//! ## Examples
//!
//! ```rust
//! use serde_lines::{lines, Logger, WriterSink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(WriterSink::new(Vec::new()));
//! let logger = Logger::new(sink.clone());
//! logger.set_global("app", "web");
//!
//! let request = logger.context(lines!({ "req": "a1b2" }));
//! request.log_msg("login", lines!({ "user": "bob" })).unwrap();
//!
//! sink.with_writer(|buf| {
//!     assert_eq!(buf.as_slice(), b"app=web msg=login user=bob req=a1b2\n");
//! });
//! ```

use crate::options::EncodeOptions;
use crate::registry::RenderError;
use crate::ser::encode_with_options;
use crate::sink::Sink;
use crate::{LineMap, Result, Value};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Severity of a line written through the leveled helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Unknown,
}

impl Level {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Unknown => "unknown",
        }
    }

    /// Maps a numeric severity (0 = debug .. 5 = unknown); out of range is `Unknown`.
    #[must_use]
    pub const fn from_severity(severity: u8) -> Self {
        match severity {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            3 => Level::Error,
            4 => Level::Fatal,
            _ => Level::Unknown,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Deferred = Arc<dyn Fn() -> std::result::Result<Value, RenderError> + Send + Sync>;

#[derive(Clone)]
enum GlobalField {
    Value(Value),
    Deferred(Deferred),
}

impl GlobalField {
    fn resolve(&self, key: &str) -> Value {
        match self {
            GlobalField::Value(value) => value.clone(),
            GlobalField::Deferred(f) => match f() {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(field = key, error = %e, "Global field failed");
                    Value::Text(format!("#<error: {}>", e))
                }
            },
        }
    }
}

/// Writes structured lines to a sink.
///
/// Cloning is cheap; clones share the sink and the global fields.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Sink>,
    options: Arc<EncodeOptions>,
    globals: Arc<RwLock<IndexMap<String, GlobalField>>>,
    context: LineMap,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("options", &self.options)
            .field("globals", &self.globals.read().keys().collect::<Vec<_>>())
            .field("context", &self.context)
            .finish()
    }
}

impl Logger {
    /// Creates a logger with [`EncodeOptions::bounded`].
    pub fn new(sink: impl Sink + 'static) -> Self {
        Logger {
            sink: Arc::new(sink),
            options: Arc::new(EncodeOptions::bounded()),
            globals: Arc::new(RwLock::new(IndexMap::new())),
            context: LineMap::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = Arc::new(options);
        self
    }

    /// Sets a field written at the start of every line.
    pub fn set_global(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.globals
            .write()
            .insert(key.into(), GlobalField::Value(value.into()));
    }

    /// Sets a field computed anew for every line.
    ///
    /// If `f` fails, the field is written as `#<error: message>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::{Logger, Value, WriterSink};
    /// use std::sync::atomic::{AtomicU64, Ordering};
    /// use std::sync::Arc;
    ///
    /// let sink = Arc::new(WriterSink::new(Vec::new()));
    /// let logger = Logger::new(sink.clone());
    /// let count = AtomicU64::new(0);
    /// logger.set_global_with("count", move || Ok(Value::from(count.fetch_add(1, Ordering::SeqCst) + 1)));
    ///
    /// logger.info("test1").unwrap();
    /// logger.info("test2").unwrap();
    /// sink.with_writer(|buf| {
    ///     assert_eq!(
    ///         buf.as_slice(),
    ///         b"count=1 pri=info msg=test1\ncount=2 pri=info msg=test2\n"
    ///     );
    /// });
    /// ```
    pub fn set_global_with<F>(&self, key: impl Into<String>, f: F)
    where
        F: Fn() -> std::result::Result<Value, RenderError> + Send + Sync + 'static,
    {
        self.globals
            .write()
            .insert(key.into(), GlobalField::Deferred(Arc::new(f)));
    }

    pub fn remove_global(&self, key: &str) {
        self.globals.write().shift_remove(key);
    }

    pub fn clear_globals(&self) {
        self.globals.write().clear();
    }

    /// Derives a logger that appends `fields` to every line.
    ///
    /// Contexts stack: a context of a context carries both sets of fields.
    #[must_use]
    pub fn context(&self, fields: LineMap) -> Logger {
        let mut context = self.context.clone();
        context.merge(&fields);
        Logger {
            context,
            ..self.clone()
        }
    }

    /// Writes `fields`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn log(&self, fields: LineMap) -> Result<()> {
        self.emit(LineMap::new(), fields)
    }

    /// Writes `msg=<msg>` followed by `fields`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn log_msg(&self, msg: impl Into<Value>, fields: LineMap) -> Result<()> {
        let mut head = LineMap::with_capacity(1);
        head.insert("msg", msg);
        self.emit(head, fields)
    }

    /// Writes an error as `ex=<type> msg=<message>`, its sources as `cause=[...]`,
    /// then `fields`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::{lines, Logger, WriterSink};
    /// use std::sync::Arc;
    ///
    /// let sink = Arc::new(WriterSink::new(Vec::new()));
    /// let logger = Logger::new(sink.clone());
    /// let err = "x".parse::<i32>().unwrap_err();
    /// logger.log_error(&err, lines!({ "user": "bob" })).unwrap();
    ///
    /// sink.with_writer(|buf| {
    ///     assert_eq!(
    ///         String::from_utf8_lossy(buf),
    ///         "ex=ParseIntError msg='invalid digit found in string' user=bob\n"
    ///     );
    /// });
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn log_error<E>(&self, err: &E, fields: LineMap) -> Result<()>
    where
        E: StdError + ?Sized,
    {
        self.emit(error_fields(err), fields)
    }

    /// Writes `pri=<level> msg=<msg>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn at(&self, level: Level, msg: impl Into<Value>) -> Result<()> {
        let mut head = LineMap::with_capacity(2);
        head.insert("pri", level.as_str());
        head.insert("msg", msg);
        self.emit(head, LineMap::new())
    }

    pub fn debug(&self, msg: impl Into<Value>) -> Result<()> {
        self.at(Level::Debug, msg)
    }

    pub fn info(&self, msg: impl Into<Value>) -> Result<()> {
        self.at(Level::Info, msg)
    }

    pub fn warn(&self, msg: impl Into<Value>) -> Result<()> {
        self.at(Level::Warn, msg)
    }

    pub fn error(&self, msg: impl Into<Value>) -> Result<()> {
        self.at(Level::Error, msg)
    }

    pub fn fatal(&self, msg: impl Into<Value>) -> Result<()> {
        self.at(Level::Fatal, msg)
    }

    pub fn unknown(&self, msg: impl Into<Value>) -> Result<()> {
        self.at(Level::Unknown, msg)
    }

    fn emit(&self, head: LineMap, fields: LineMap) -> Result<()> {
        let mut line = self.resolve_globals();
        line.merge(&head);
        line.merge(&fields);
        line.merge(&self.context);
        self.sink.write_line(&encode_with_options(&line, &self.options))
    }

    fn resolve_globals(&self) -> LineMap {
        // Deferred fields may log themselves; resolve outside the lock.
        let globals: Vec<(String, GlobalField)> = self
            .globals
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        globals
            .into_iter()
            .map(|(key, field)| {
                let value = field.resolve(&key);
                (key, value)
            })
            .collect()
    }
}

fn error_fields<E: StdError + ?Sized>(err: &E) -> LineMap {
    let mut fields = LineMap::with_capacity(3);
    fields.insert("ex", short_type_name(std::any::type_name::<E>()));
    fields.insert("msg", err.to_string());

    let mut causes = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        causes.push(Value::Text(cause.to_string()));
        source = cause.source();
    }
    if !causes.is_empty() {
        fields.insert("cause", Value::Sequence(causes));
    }
    fields
}

/// `std::num::ParseIntError` -> `ParseIntError`, `a::Wrapper<b::C>` -> `Wrapper`.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines;
    use crate::sink::WriterSink;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn capture() -> (Arc<WriterSink<Vec<u8>>>, Logger) {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let logger = Logger::new(sink.clone());
        (sink, logger)
    }

    fn output(sink: &WriterSink<Vec<u8>>) -> String {
        sink.with_writer(|buf| String::from_utf8(buf.clone()).unwrap())
    }

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_log_fields() {
        let (sink, logger) = capture();
        logger.log(lines!({ "foo": "bar" })).unwrap();
        assert_eq!(output(&sink), "foo=bar\n");
    }

    #[test]
    fn test_log_msg() {
        let (sink, logger) = capture();
        logger
            .log_msg("this user is annoying", lines!({ "user": "bob" }))
            .unwrap();
        assert_eq!(output(&sink), "msg='this user is annoying' user=bob\n");
    }

    #[test]
    fn test_log_error_with_causes() {
        let (sink, logger) = capture();
        let err = Outer(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        logger.log_error(&err, lines!({ "user": "bob" })).unwrap();
        assert_eq!(
            output(&sink),
            "ex=Outer msg='request failed' cause=['disk full'] user=bob\n"
        );
    }

    #[test]
    fn test_context_is_appended_and_stacks() {
        let (sink, logger) = capture();
        logger.set_global("app", "self");
        let ctx = logger.context(lines!({ "foo": "bar" }));
        ctx.log_msg("msg", lines!({ "ahoi": true })).unwrap();
        ctx.context(lines!({ "req": 7 })).log(lines!({ "a": "b" })).unwrap();
        assert_eq!(
            output(&sink),
            "app=self msg=msg ahoi=#t foo=bar\napp=self a=b foo=bar req=7\n"
        );
    }

    #[test]
    fn test_later_keys_override() {
        let (sink, logger) = capture();
        logger.set_global("app", "one");
        logger
            .context(lines!({ "app": "three" }))
            .log(lines!({ "app": "two", "x": 1 }))
            .unwrap();
        assert_eq!(output(&sink), "app=three x=1\n");
    }

    #[test]
    fn test_globals_are_shared_with_contexts() {
        let (sink, logger) = capture();
        let ctx = logger.context(lines!({ "c": 1 }));
        logger.set_global("app", "web");
        ctx.log(lines!({})).unwrap();
        logger.remove_global("app");
        ctx.log(lines!({})).unwrap();
        assert_eq!(output(&sink), "app=web c=1\nc=1\n");
    }

    #[test]
    fn test_deferred_global() {
        let (sink, logger) = capture();
        let count = AtomicU64::new(0);
        logger.set_global_with("count", move || {
            Ok(Value::from(count.fetch_add(1, Ordering::SeqCst) + 1))
        });
        logger.log_msg("test1", lines!({})).unwrap();
        logger.log_msg("test2", lines!({})).unwrap();
        assert_eq!(output(&sink), "count=1 msg=test1\ncount=2 msg=test2\n");
    }

    #[test]
    fn test_failing_deferred_global() {
        let (sink, logger) = capture();
        logger.set_global_with("X", || Err("error".into()));
        logger.log_msg("test", lines!({})).unwrap();
        assert_eq!(output(&sink), "X='#<error: error>' msg=test\n");
    }

    #[test]
    fn test_clear_globals() {
        let (sink, logger) = capture();
        logger.set_global("a", 1);
        logger.set_global("b", 2);
        logger.clear_globals();
        logger.info("hi").unwrap();
        assert_eq!(output(&sink), "pri=info msg=hi\n");
    }

    #[test]
    fn test_levels() {
        let (sink, logger) = capture();
        logger.warn("careful").unwrap();
        logger.at(Level::from_severity(4), "down").unwrap();
        logger.at(Level::from_severity(42), "huh").unwrap();
        assert_eq!(
            output(&sink),
            "pri=warn msg=careful\npri=fatal msg=down\npri=unknown msg=huh\n"
        );
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("core::num::error::ParseIntError"), "ParseIntError");
        assert_eq!(short_type_name("app::Wrapper<std::io::Error>"), "Wrapper");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_bounded_by_default() {
        let (sink, logger) = capture();
        logger.log(lines!({ "big": ("x".repeat(5000)) })).unwrap();
        assert_eq!(output(&sink), "...\n");
    }
}
