//! Ordered list of request ids for one collection.

use serde::{Deserialize, Serialize};

/// The authoritative order of requests in a collection.
///
/// A catalog never holds the same id twice. Mutations are idempotent:
/// appending an id that is already present or removing one that is absent
/// leaves the catalog unchanged.
///
/// On disk a catalog is a plain sequence of ids. Duplicates in a
/// hand-edited file are dropped on load, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Catalog {
    ids: Vec<String>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Appends `id` at the end. Returns `false` if it was already present.
    pub fn append(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`. Returns `false` if it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if `id` is in the catalog.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Returns the position of `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|existing| existing == id)
    }

    /// Returns the ids in order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Returns the number of ids.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<String>> for Catalog {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<Catalog> for Vec<String> {
    fn from(catalog: Catalog) -> Self {
        catalog.ids
    }
}

impl<S: Into<String>> FromIterator<S> for Catalog {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for id in iter {
            catalog.append(id);
        }
        catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_is_idempotent() {
        let mut catalog = Catalog::new();
        assert!(catalog.append("a"));
        assert!(!catalog.append("a"));
        assert_eq!(catalog.ids(), ["a"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut catalog: Catalog = ["a", "b"].into_iter().collect();
        assert!(catalog.remove("a"));
        assert!(!catalog.remove("a"));
        assert_eq!(catalog.ids(), ["b"]);
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let catalog: Catalog = serde_json::from_str(r#"["b","a","b"]"#).unwrap();
        assert_eq!(catalog.ids(), ["b", "a"]);
        assert_eq!(catalog.position("a"), Some(1));
    }

    #[test]
    fn test_serializes_as_plain_sequence() {
        let catalog: Catalog = ["x", "y"].into_iter().collect();
        assert_eq!(serde_json::to_string(&catalog).unwrap(), r#"["x","y"]"#);
    }
}
