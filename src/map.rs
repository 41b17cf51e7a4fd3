//! Ordered mapping type for lines and nested objects.
//!
//! [`LineMap`] wraps an [`IndexMap`] so pairs are encoded in the order they were
//! inserted. Keys are unique: inserting an existing key replaces its value but
//! keeps its original position, which is also how the decoder resolves a key
//! that appears twice in one line (last value wins).
//!
//! ## Examples
//!
//! ```rust
//! use serde_lines::{LineMap, Value};
//!
//! let mut map = LineMap::new();
//! map.insert("at", Value::from("boot"));
//! map.insert("elapsed", Value::from(12));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("at").and_then(|v| v.as_str()), Some("boot"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// An insertion-ordered map of string keys to [`Value`]s.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{LineMap, Value};
///
/// let mut map = LineMap::new();
/// map.insert("first", Value::from(1));
/// map.insert("second", Value::from(2));
/// map.insert("first", Value::from(3));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// assert_eq!(map.get("first").and_then(|v| v.as_i64()), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineMap(IndexMap<String, Value>);

impl LineMap {
    #[must_use]
    pub fn new() -> Self {
        LineMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        LineMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a pair, returning the previous value of `key` if there was one.
    ///
    /// A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Removes `key`, preserving the order of the remaining pairs.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts every pair of `other` in order; later values win.
    pub fn merge(&mut self, other: &LineMap) {
        for (k, v) in other.iter() {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, Value>> for LineMap {
    fn from(map: HashMap<String, Value>) -> Self {
        LineMap(map.into_iter().collect())
    }
}

impl From<LineMap> for HashMap<String, Value> {
    fn from(map: LineMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for LineMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LineMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for LineMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        LineMap(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, Value)> for LineMap {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl Serialize for LineMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LineMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Mapping(map) => Ok(map),
            other => Err(de::Error::custom(format!(
                "expected a mapping, found {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_keeps_order() {
        let mut map = LineMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);
        assert_eq!(map.remove("b"), Some(Value::from(2)));
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_merge_overrides_values_in_place() {
        let mut base = LineMap::new();
        base.insert("app", "web");
        base.insert("msg", "hi");

        let mut extra = LineMap::new();
        extra.insert("app", "worker");
        extra.insert("user", "bob");

        base.merge(&extra);
        let pairs: Vec<_> = base
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str().unwrap_or_default()))
            .collect();
        assert_eq!(
            pairs,
            vec![("app", "worker"), ("msg", "hi"), ("user", "bob")]
        );
    }
}
