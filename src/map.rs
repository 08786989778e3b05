//! Ordered map type for VDF objects.
//!
//! [`VdfMap`] wraps an [`IndexMap`] so object entries iterate in the order
//! they appeared in the source text, which is the order they are written
//! back out.
//!
//! Keys are unique. Inserting a key that is already present replaces its
//! value and keeps the entry at its original position; it does not move to
//! the end.
//!
//! ## Examples
//!
//! ```rust
//! use serde_vdf::{VdfMap, Value};
//!
//! let mut map = VdfMap::new();
//! map.insert("a".to_string(), Value::from("1"));
//! map.insert("b".to_string(), Value::from("2"));
//! map.insert("a".to_string(), Value::from("3"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["a", "b"]);
//! assert_eq!(map.get("a").and_then(|v| v.as_str()), Some("3"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to VDF values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VdfMap(IndexMap<String, Value>);

impl VdfMap {
    /// Creates an empty `VdfMap`.
    #[must_use]
    pub fn new() -> Self {
        VdfMap(IndexMap::new())
    }

    /// Creates an empty `VdfMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        VdfMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the entry keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vdf::{VdfMap, Value};
    ///
    /// let mut map = VdfMap::new();
    /// assert!(map.insert("key".to_string(), Value::from("1")).is_none());
    /// assert!(map.insert("key".to_string(), Value::from("2")).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns the value for `key`, compared case-sensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns the first entry whose key matches `key` ignoring case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vdf::{VdfMap, Value};
    ///
    /// let mut map = VdfMap::new();
    /// map.insert("SurveyDate".to_string(), Value::from("2017-07-03"));
    /// assert!(map.get("surveydate").is_none());
    /// let (key, _) = map.get_ignore_case("surveydate").unwrap();
    /// assert_eq!(key, "SurveyDate");
    /// ```
    #[must_use]
    pub fn get_ignore_case(&self, key: &str) -> Option<(&String, &Value)> {
        self.0.iter().find(|(k, _)| eq_ignore_case(k, key))
    }

    /// Returns `true` if the map contains `key` (case-sensitive).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, shifting later entries down to preserve order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

/// Unicode-aware case-insensitive comparison used for field matching.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
        || a.chars()
            .flat_map(char::to_lowercase)
            .eq(b.chars().flat_map(char::to_lowercase))
}

impl From<HashMap<String, Value>> for VdfMap {
    fn from(map: HashMap<String, Value>) -> Self {
        VdfMap(map.into_iter().collect())
    }
}

impl From<VdfMap> for IndexMap<String, Value> {
    fn from(map: VdfMap) -> Self {
        map.0
    }
}

impl IntoIterator for VdfMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VdfMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for VdfMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        VdfMap(IndexMap::from_iter(iter))
    }
}
