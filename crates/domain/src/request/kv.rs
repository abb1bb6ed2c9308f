//! Ordered key-value pairs used for query parameters and headers.

use serde::{Deserialize, Serialize};

/// A single key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyValue {
    /// The key (parameter or header name)
    pub key: String,
    /// The value
    pub value: String,
}

impl KeyValue {
    /// Creates a new pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered sequence of key-value pairs.
///
/// This is deliberately not a map: insertion order is preserved and the
/// same key may appear more than once, which is how both query strings and
/// HTTP headers behave on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyValuePairs {
    items: Vec<KeyValue>,
}

impl KeyValuePairs {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a pair at the end.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.push(KeyValue::new(key, value));
    }

    /// Removes the first pair matching both key and value.
    ///
    /// Returns `true` if a pair was removed.
    pub fn remove(&mut self, key: &str, value: &str) -> bool {
        match self
            .items
            .iter()
            .position(|kv| kv.key == key && kv.value == value)
        {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the pair at `index`, returning it if the index was in bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<KeyValue> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Sorts pairs by key, then by value.
    pub fn sort(&mut self) {
        self.items.sort();
    }

    /// Returns the value of the first pair whose key matches, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|kv| kv.key.eq_ignore_ascii_case(key))
            .map(|kv| kv.value.as_str())
    }

    /// Returns true if any pair has the given key, ignoring ASCII case.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator over the pairs in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeyValue> {
        self.items.iter()
    }

    /// Returns all pairs.
    #[must_use]
    pub fn all(&self) -> &[KeyValue] {
        &self.items
    }

    /// Returns the number of pairs.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no pairs.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<KeyValue> for KeyValuePairs {
    fn from_iter<T: IntoIterator<Item = KeyValue>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValuePairs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(key, value)| KeyValue::new(key, value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a KeyValuePairs {
    type Item = &'a KeyValue;
    type IntoIter = std::slice::Iter<'a, KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(pairs: &KeyValuePairs) -> Vec<&str> {
        pairs.iter().map(|kv| kv.key.as_str()).collect()
    }

    #[test]
    fn test_preserves_insertion_order_and_duplicates() {
        let mut pairs = KeyValuePairs::new();
        pairs.add("b", "1");
        pairs.add("a", "2");
        pairs.add("b", "3");

        assert_eq!(keys(&pairs), vec!["b", "a", "b"]);
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_remove_only_first_match() {
        let mut pairs: KeyValuePairs = [("x", "1"), ("x", "1"), ("y", "2")].into_iter().collect();

        assert!(pairs.remove("x", "1"));
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.all()[0], KeyValue::new("x", "1"));
        assert!(!pairs.remove("x", "9"));
    }

    #[test]
    fn test_remove_at() {
        let mut pairs: KeyValuePairs = [("a", "1"), ("b", "2")].into_iter().collect();

        assert_eq!(pairs.remove_at(0), Some(KeyValue::new("a", "1")));
        assert_eq!(pairs.remove_at(5), None);
        assert_eq!(keys(&pairs), vec!["b"]);
    }

    #[test]
    fn test_sort_by_key_then_value() {
        let mut pairs: KeyValuePairs = [("b", "1"), ("a", "2"), ("a", "1")].into_iter().collect();
        pairs.sort();

        let flat: Vec<_> = pairs
            .iter()
            .map(|kv| (kv.key.as_str(), kv.value.as_str()))
            .collect();
        assert_eq!(flat, vec![("a", "1"), ("a", "2"), ("b", "1")]);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let pairs: KeyValuePairs = [("Content-Type", "application/json")].into_iter().collect();

        assert_eq!(pairs.get("content-type"), Some("application/json"));
        assert!(!pairs.contains_key("accept"));
    }
}
