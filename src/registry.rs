//! Renderers for values with no built-in line representation.
//!
//! An [`ExtensionRegistry`] is an ordered list of `(matcher, renderer)` entries.
//! When the encoder meets an [`Opaque`] value it asks the registry; the first
//! entry whose matcher accepts the value renders it into an ordinary [`Value`],
//! which is then encoded like any other. The registry is a plain value carried by
//! [`EncodeOptions`](crate::EncodeOptions), so every encode call sees one fixed
//! snapshot.
//!
//! ## Examples
//!
//! ```rust
//! use serde_lines::{encode_with_options, EncodeOptions, ExtensionRegistry, LineMap, Value};
//!
//! #[derive(Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let registry = ExtensionRegistry::new()
//!     .with_renderer(|p: &Point| Ok(Value::Sequence(vec![p.x.into(), p.y.into()])));
//!
//! let mut line = LineMap::new();
//! line.insert("at", Value::opaque(Point { x: 3, y: 5 }));
//!
//! let options = EncodeOptions::new().with_registry(registry);
//! assert_eq!(encode_with_options(&line, &options), "at=[3 5]");
//! ```

use crate::value::Opaque;
use crate::Value;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Error type returned by renderers.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

type Matcher = Arc<dyn Fn(&Opaque) -> bool + Send + Sync>;
type Renderer = Arc<dyn Fn(&Opaque) -> Result<Value, RenderError> + Send + Sync>;

#[derive(Clone)]
struct Entry {
    name: &'static str,
    matches: Matcher,
    render: Renderer,
}

/// Ordered `(matcher, renderer)` list; first match wins.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    entries: Vec<Entry>,
}

impl ExtensionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a renderer for values of type `T`, builder style.
    #[must_use]
    pub fn with_renderer<T, F>(mut self, render: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> Result<Value, RenderError> + Send + Sync + 'static,
    {
        self.register(render);
        self
    }

    /// Adds a renderer for values of type `T`.
    ///
    /// Entries are tried in registration order, so register specific renderers
    /// before general ones.
    pub fn register<T, F>(&mut self, render: F)
    where
        T: Any,
        F: Fn(&T) -> Result<Value, RenderError> + Send + Sync + 'static,
    {
        let render: Renderer = Arc::new(move |opaque: &Opaque| match opaque.downcast_ref::<T>() {
            Some(value) => render(value),
            None => Err(format!("expected {}", std::any::type_name::<T>()).into()),
        });
        self.entries.push(Entry {
            name: std::any::type_name::<T>(),
            matches: Arc::new(|opaque: &Opaque| opaque.is::<T>()),
            render,
        });
    }

    /// Adds an entry with an arbitrary matcher, for renderers that cover more
    /// than one type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_lines::{ExtensionRegistry, Opaque, Value};
    ///
    /// let mut registry = ExtensionRegistry::new();
    /// registry.register_with(
    ///     "tagged",
    ///     |o: &Opaque| o.type_name().ends_with("Tag"),
    ///     |o: &Opaque| Ok(Value::from(o.type_name())),
    /// );
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn register_with<P, F>(&mut self, name: &'static str, matches: P, render: F)
    where
        P: Fn(&Opaque) -> bool + Send + Sync + 'static,
        F: Fn(&Opaque) -> Result<Value, RenderError> + Send + Sync + 'static,
    {
        self.entries.push(Entry {
            name,
            matches: Arc::new(matches),
            render: Arc::new(render),
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders `opaque` with the first matching entry.
    ///
    /// Returns `None` when no entry matches. A renderer that fails, panics, or
    /// hands back another opaque value yields the [`fallback_tag`] text instead.
    pub fn render(&self, opaque: &Opaque) -> Option<Value> {
        let entry = self.entries.iter().find(|entry| (entry.matches)(opaque))?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (entry.render)(opaque)));
        let rendered = match outcome {
            Ok(Ok(Value::Opaque(_))) => {
                tracing::warn!(
                    renderer = entry.name,
                    "Renderer returned an opaque value"
                );
                None
            }
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                tracing::warn!(renderer = entry.name, error = %e, "Renderer failed");
                None
            }
            Err(_) => {
                tracing::warn!(renderer = entry.name, "Renderer panicked");
                None
            }
        };

        Some(rendered.unwrap_or_else(|| Value::Text(fallback_tag(opaque))))
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.name))
            .finish()
    }
}

/// Stand-in text for a value that could not be rendered, such as
/// `#<app::Socket:0x55d0c1a2b3c0>`.
#[must_use]
pub fn fallback_tag(opaque: &Opaque) -> String {
    format!("#<{}:{:#x}>", opaque.type_name(), opaque.address())
}

/// The `Debug` text of `opaque`, or its [`fallback_tag`] when the `Debug`
/// impl fails or panics.
pub(crate) fn debug_text(opaque: &Opaque) -> String {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut text = String::new();
        fmt::Write::write_fmt(&mut text, format_args!("{:?}", opaque)).map(|()| text)
    }));
    match outcome {
        Ok(Ok(text)) => text,
        Ok(Err(_)) => {
            tracing::warn!(type_name = opaque.type_name(), "Debug impl failed");
            fallback_tag(opaque)
        }
        Err(_) => {
            tracing::warn!(type_name = opaque.type_name(), "Debug impl panicked");
            fallback_tag(opaque)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Debug)]
    struct Broken;

    #[test]
    fn test_no_match_returns_none() {
        let registry = ExtensionRegistry::new();
        assert!(registry.render(&Opaque::new(Point { x: 1, y: 2 })).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let registry = ExtensionRegistry::new()
            .with_renderer(|p: &Point| Ok(Value::from(p.x)))
            .with_renderer(|p: &Point| Ok(Value::from(p.y)));

        let rendered = registry.render(&Opaque::new(Point { x: 1, y: 2 }));
        assert_eq!(rendered, Some(Value::from(1)));
    }

    #[test]
    fn test_failing_renderer_falls_back_to_tag() {
        let registry =
            ExtensionRegistry::new().with_renderer(|_: &Broken| Err("no representation".into()));

        let opaque = Opaque::new(Broken);
        let rendered = registry.render(&opaque);
        assert_eq!(rendered, Some(Value::Text(fallback_tag(&opaque))));
    }

    #[test]
    fn test_panicking_renderer_falls_back_to_tag() {
        let registry = ExtensionRegistry::new().with_renderer(|_: &Broken| -> Result<Value, RenderError> {
            panic!("renderer bug")
        });

        let opaque = Opaque::new(Broken);
        let tag = registry.render(&opaque).and_then(|v| v.as_str().map(str::to_string));
        let tag = tag.unwrap();
        assert!(tag.starts_with("#<"));
        assert!(tag.contains("Broken:0x"));
        assert!(tag.ends_with('>'));
    }

    #[test]
    fn test_opaque_result_falls_back_to_tag() {
        let registry =
            ExtensionRegistry::new().with_renderer(|_: &Broken| Ok(Value::opaque(Broken)));

        let opaque = Opaque::new(Broken);
        assert_eq!(
            registry.render(&opaque),
            Some(Value::Text(fallback_tag(&opaque)))
        );
    }

    struct PanickyDebug;

    impl fmt::Debug for PanickyDebug {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("debug bug")
        }
    }

    struct FailingDebug;

    impl fmt::Debug for FailingDebug {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_debug_text() {
        assert_eq!(debug_text(&Opaque::new(Point { x: 1, y: 2 })), "Point { x: 1, y: 2 }");

        let opaque = Opaque::new(PanickyDebug);
        assert_eq!(debug_text(&opaque), fallback_tag(&opaque));

        let opaque = Opaque::new(FailingDebug);
        assert_eq!(debug_text(&opaque), fallback_tag(&opaque));
    }

    #[test]
    fn test_debug_lists_entry_names() {
        let registry = ExtensionRegistry::new().with_renderer(|p: &Point| Ok(Value::from(p.x)));
        assert!(format!("{:?}", registry).contains("Point"));
    }
}
