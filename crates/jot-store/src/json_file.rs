use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{Families, FamilyMap, StoreBackend};

/// JSON-file backend: one `<family>.json` document per family.
///
/// Each family is a single JSON object mapping entry keys to string values,
/// stored under the data directory. Every write rewrites the whole family
/// document through a temporary file in the same directory, syncs it, and
/// renames it over the target, so a crash mid-write never leaves a
/// half-written document behind.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "opened json file store");
        Ok(Self { root })
    }

    /// The data directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn family_path(&self, family: &str) -> StoreResult<PathBuf> {
        if family.is_empty()
            || !family
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StoreError::InvalidFamily(family.to_string()));
        }
        Ok(self.root.join(format!("{family}.json")))
    }

    fn load_family(&self, family: &str) -> StoreResult<FamilyMap> {
        let path = self.family_path(family)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FamilyMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Serialization {
            family: family.to_string(),
            source,
        })
    }

    fn write_family(&self, family: &str, entries: &FamilyMap) -> StoreResult<()> {
        let path = self.family_path(family)?;
        let bytes =
            serde_json::to_vec_pretty(entries).map_err(|source| StoreError::Serialization {
                family: family.to_string(),
                source,
            })?;

        // Temp file in the same directory so the rename stays on one
        // filesystem.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        debug!(family, entries = entries.len(), "family document written");
        Ok(())
    }
}

impl StoreBackend for JsonFileStore {
    fn load_all(&self) -> StoreResult<Families> {
        let mut families = Families::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(family) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            families.insert(family.to_string(), self.load_family(family)?);
        }
        debug!(families = families.len(), "loaded persisted families");
        Ok(families)
    }

    fn persist_entry(&self, family: &str, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.load_family(family)?;
        entries.insert(key.to_string(), value.to_string());
        self.write_family(family, &entries)
    }

    fn list_keys(&self, family: &str) -> StoreResult<Vec<String>> {
        // BTreeMap iteration order is the committed ascending key order.
        Ok(self.load_family(family)?.into_keys().collect())
    }

    fn remove_entry(&self, family: &str, key: &str) -> StoreResult<bool> {
        let mut entries = self.load_family(family)?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.write_family(family, &entries)?;
        Ok(true)
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("root", &self.root)
            .finish()
    }
}
