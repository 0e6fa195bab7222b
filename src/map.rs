//! Ordered map type for YAML mappings.
//!
//! This module provides [`Mapping`], a wrapper around [`IndexMap`] that keeps
//! keys in insertion order. The stringifier emits keys in exactly this order
//! unless [`DumpOptions::sort_keys`](crate::DumpOptions) is requested.
//!
//! Keys are always strings: non-string keys coming through serde are stringified by
//! [`ValueSerializer`](crate::ValueSerializer) or rejected.

use indexmap::IndexMap;

/// String-keyed mapping that remembers insertion order.
///
/// ```rust
/// use yaml_stringify::{stringify, Mapping, Value};
///
/// let mut map = Mapping::new();
/// map.insert("b".to_string(), Value::from(1));
/// map.insert("a".to_string(), Value::from(2));
/// assert_eq!(stringify(&Value::Mapping(map)).unwrap(), "b: 1\na: 2\n");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping(IndexMap<String, crate::Value>);

impl Mapping {
    /// Creates an empty `Mapping`.
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    /// Creates an empty `Mapping` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_stringify::{Mapping, Value};
    ///
    /// let mut map = Mapping::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
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
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl Default for Mapping {
    fn default() -> Self {
        Self::new()
    }
}
