use std::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::{Families, StoreBackend};

/// In-memory backend for tests and embedding.
///
/// Holds all families behind an `RwLock`; "durability" is the lifetime of
/// the value. Useful for exercising the actor without touching disk, and
/// for seeding a store with known contents.
pub struct InMemoryStore {
    families: RwLock<Families>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            families: RwLock::new(Families::new()),
        }
    }

    /// Create a store pre-populated with `families`.
    pub fn with_families(families: Families) -> Self {
        Self {
            families: RwLock::new(families),
        }
    }

    /// Number of families currently held.
    pub fn family_count(&self) -> usize {
        self.families.read().expect("lock poisoned").len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackend for InMemoryStore {
    fn load_all(&self) -> StoreResult<Families> {
        Ok(self.families.read().expect("lock poisoned").clone())
    }

    fn persist_entry(&self, family: &str, key: &str, value: &str) -> StoreResult<()> {
        self.families
            .write()
            .expect("lock poisoned")
            .entry(family.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn list_keys(&self, family: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .families
            .read()
            .expect("lock poisoned")
            .get(family)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn remove_entry(&self, family: &str, key: &str) -> StoreResult<bool> {
        Ok(self
            .families
            .write()
            .expect("lock poisoned")
            .get_mut(family)
            .map(|entries| entries.remove(key).is_some())
            .unwrap_or(false))
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("family_count", &self.family_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_then_load() {
        let store = InMemoryStore::new();
        store.persist_entry("f", "k", "v").unwrap();

        let families = store.load_all().unwrap();
        assert_eq!(families["f"]["k"], "v");
    }

    #[test]
    fn list_keys_is_sorted() {
        let store = InMemoryStore::new();
        store.persist_entry("f", "b", "2").unwrap();
        store.persist_entry("f", "a", "1").unwrap();
        store.persist_entry("f", "c", "3").unwrap();

        assert_eq!(store.list_keys("f").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_family_lists_empty() {
        let store = InMemoryStore::new();
        assert!(store.list_keys("missing").unwrap().is_empty());
    }

    #[test]
    fn remove_entry_reports_presence() {
        let store = InMemoryStore::new();
        store.persist_entry("f", "k", "v").unwrap();

        assert!(store.remove_entry("f", "k").unwrap());
        assert!(!store.remove_entry("f", "k").unwrap());
        assert!(!store.remove_entry("other", "k").unwrap());
    }

    #[test]
    fn with_families_seeds_contents() {
        let mut families = Families::new();
        families
            .entry("seeded".to_string())
            .or_default()
            .insert("k".to_string(), "v".to_string());

        let store = InMemoryStore::with_families(families);
        assert_eq!(store.family_count(), 1);
        assert_eq!(store.list_keys("seeded").unwrap(), vec!["k"]);
    }
}
