use std::collections::BTreeMap;

use crate::error::StoreResult;

/// All entries of one family, keyed by entry name.
pub type FamilyMap = BTreeMap<String, String>;

/// Every persisted family, keyed by family name.
pub type Families = BTreeMap<String, FamilyMap>;

/// Durability collaborator behind the store actor.
///
/// All implementations must satisfy these invariants:
/// - `persist_entry` is durable: once it returns `Ok`, the entry survives a
///   process restart and is visible to a subsequent `load_all`.
/// - Writes are visible to subsequent reads within the same process.
/// - `list_keys` returns keys in ascending lexicographic order and is
///   stable for a given snapshot of the family.
/// - All I/O errors are propagated, never silently ignored.
///
/// The backend is never called concurrently — the single actor task is the
/// only caller — so implementations need interior synchronization only if
/// they are also used directly from tests or embedders.
pub trait StoreBackend: Send {
    /// Load every persisted family. Called once, at actor startup.
    fn load_all(&self) -> StoreResult<Families>;

    /// Durably write one entry, inserting or overwriting `key` in `family`.
    ///
    /// A family that does not exist yet is created.
    fn persist_entry(&self, family: &str, key: &str, value: &str) -> StoreResult<()>;

    /// Enumerate the keys of `family`, sorted ascending.
    ///
    /// A family with no persisted entries yields an empty list. The actor
    /// answers key listings from its in-memory snapshot; this method is for
    /// embedders and tools reading persisted state directly.
    fn list_keys(&self, family: &str) -> StoreResult<Vec<String>>;

    /// Remove `key` from `family`. Returns `true` if the entry existed.
    fn remove_entry(&self, family: &str, key: &str) -> StoreResult<bool>;
}

/// A shared backend is itself a backend. Lets an embedder keep a handle to
/// the same store the actor owns, e.g. to inspect state from tests.
impl<B: StoreBackend + Sync> StoreBackend for std::sync::Arc<B> {
    fn load_all(&self) -> StoreResult<Families> {
        (**self).load_all()
    }

    fn persist_entry(&self, family: &str, key: &str, value: &str) -> StoreResult<()> {
        (**self).persist_entry(family, key, value)
    }

    fn list_keys(&self, family: &str) -> StoreResult<Vec<String>> {
        (**self).list_keys(family)
    }

    fn remove_entry(&self, family: &str, key: &str) -> StoreResult<bool> {
        (**self).remove_entry(family, key)
    }
}
