use linked_hash_map::LinkedHashMap;
use std::{borrow::Borrow, fmt::Display, hash::Hash, iter::IntoIterator};
use thiserror::Error;

/// An insertion-ordered map that refuses duplicate keys. Iteration order is
/// insertion order, which makes it suitable for layouts where both field
/// order and field-name uniqueness are semantic, such as struct type
/// declarations.
#[derive(Debug, Hash, Default, Clone, PartialEq, Eq)]
pub struct UniqueOrderedMap<K, V>(LinkedHashMap<K, V>)
where
    K: Hash + Eq + Display;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("duplicate key found: {0}")]
pub struct DuplicateKeyError(pub String);

impl DuplicateKeyError {
    pub fn key_name(self) -> String {
        self.0
    }
}

impl<K, V> UniqueOrderedMap<K, V>
where
    K: Hash + Eq + Display,
{
    pub fn new() -> Self {
        Self(LinkedHashMap::new())
    }

    /// Inserts a key-value pair, failing if the key is already present.
    /// The map is unchanged on failure.
    pub fn insert(&mut self, k: K, v: V) -> Result<(), DuplicateKeyError> {
        // Checking before inserting avoids the clone that would be needed
        // to report the key after a failed insert.
        if self.0.contains_key(&k) {
            return Err(DuplicateKeyError(format!("{k}")));
        }
        self.0.insert(k, v);
        Ok(())
    }

    pub fn insert_many(
        &mut self,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), DuplicateKeyError> {
        for (k, v) in entries {
            self.insert(k, v)?;
        }
        Ok(())
    }

    /// Builds a map from an iterator of entries, failing on the first
    /// duplicate key.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, DuplicateKeyError> {
        let mut out = Self::new();
        out.insert_many(entries)?;
        Ok(out)
    }

    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.get(k)
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.contains_key(k)
    }

    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.remove(k)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter()
    }
}

impl<K, V> IntoIterator for UniqueOrderedMap<K, V>
where
    K: Hash + Eq + Display,
{
    type Item = (K, V);
    type IntoIter = linked_hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K, V> From<UniqueOrderedMap<K, V>> for LinkedHashMap<K, V>
where
    K: Hash + Eq + Display,
{
    fn from(m: UniqueOrderedMap<K, V>) -> Self {
        m.0
    }
}

#[cfg(test)]
mod test {
    use super::{DuplicateKeyError, UniqueOrderedMap};

    #[test]
    fn insert_rejects_duplicate_key() {
        let mut m = UniqueOrderedMap::new();
        m.insert("a", 1).unwrap();
        assert_eq!(
            Err(DuplicateKeyError("a".to_string())),
            m.insert("a", 2),
        );
        // the original binding survives a failed insert
        assert_eq!(Some(&1), m.get("a"));
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let m = UniqueOrderedMap::from_entries([("b", 1), ("a", 2), ("c", 3)]).unwrap();
        assert_eq!(vec!["b", "a", "c"], m.keys().copied().collect::<Vec<_>>());
    }

    #[test]
    fn from_entries_fails_on_first_duplicate() {
        let result = UniqueOrderedMap::from_entries([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(Err(DuplicateKeyError("a".to_string())), result);
    }
}
