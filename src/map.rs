//! Ordered map type for KODA objects.
//!
//! This module provides [`KodaMap`], a wrapper around [`IndexMap`] that keeps
//! object entries in insertion order. Insertion order is what `stringify`
//! emits, so a document round-trips through text without its keys moving;
//! only the binary encoder re-sorts keys (canonicalization is a binary
//! concern).
//!
//! ## Examples
//!
//! ```rust
//! use koda::{KodaMap, Value};
//!
//! let mut map = KodaMap::new();
//! map.insert("name".to_string(), Value::from("my-app"));
//! map.insert("version".to_string(), Value::from(1));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("my-app"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to KODA values.
///
/// # Examples
///
/// ```rust
/// use koda::{KodaMap, Value};
///
/// let mut map = KodaMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// // Iteration follows insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KodaMap(IndexMap<String, crate::Value>);

impl KodaMap {
    /// Creates an empty `KodaMap`.
    #[must_use]
    pub fn new() -> Self {
        KodaMap(IndexMap::new())
    }

    /// Creates an empty `KodaMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        KodaMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use koda::{KodaMap, Value};
    ///
    /// let mut map = KodaMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(1)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(2)).is_some());
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

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
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

    /// Returns an iterator over the entries of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for KodaMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        KodaMap(map.into_iter().collect())
    }
}

impl From<KodaMap> for HashMap<String, crate::Value> {
    fn from(map: KodaMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a KodaMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for KodaMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, crate::Value)> for KodaMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        KodaMap(IndexMap::from_iter(iter))
    }
}
