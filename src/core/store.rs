//! Store - JSON file backend
//!
//! The whole collection lives in one JSON file that is read completely
//! before every operation and rewritten completely after every mutation.
//!
//! # Key Points
//! - Missing file == empty collection
//! - Stable field order, two-space indentation, non-ASCII kept verbatim
//! - IDs are `max + 1`, so they are never reused
//! - No locking: two concurrent load/modify/save cycles race and the later
//!   save wins

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::entry::{Entry, EntryField, UnknownField};

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed collection in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no IDs left in {}: the largest ID is already in use", path.display())]
    IdExhausted { path: PathBuf },

    #[error(transparent)]
    UnknownField(#[from] UnknownField),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Entry storage backed by a single JSON file
#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    /// Open a store at the given path. Nothing is read until the first call.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole collection
    pub fn load(&self) -> Result<Vec<Entry>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No collection file yet, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the whole collection
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let mut content = serde_json::to_string_pretty(entries).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        content.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        // Write next to the target, then rename over it
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), count = entries.len(), "Collection saved");
        Ok(())
    }

    /// `1 + max(ID)`, or 1 for an empty collection. `None` once the
    /// largest ID is `u64::MAX`.
    pub fn next_id(entries: &[Entry]) -> Option<u64> {
        match entries.iter().map(|e| e.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Assign the next ID to `entry`, append it and save
    pub fn append(&self, mut entry: Entry) -> Result<Entry> {
        let mut entries = self.load()?;
        entry.id = Self::next_id(&entries).ok_or_else(|| StoreError::IdExhausted {
            path: self.path.clone(),
        })?;
        entries.push(entry.clone());
        self.save(&entries)?;

        info!(id = entry.id, kind = %entry.kind, module = %entry.module, "Entry added");
        Ok(entry)
    }

    pub fn find_by_id(&self, id: u64) -> Result<Option<Entry>> {
        Ok(self.load()?.into_iter().find(|e| e.id == id))
    }

    /// Set one mutable field of an entry and save.
    ///
    /// Returns `Ok(None)` when no entry has this ID. Field names outside
    /// the mutable set fail before anything is read or written.
    pub fn update_field(&self, id: u64, field: &str, value: &str) -> Result<Option<Entry>> {
        let field: EntryField = field.parse()?;

        let mut entries = self.load()?;
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        entry.set(field, value);
        let updated = entry.clone();

        self.save(&entries)?;

        info!(id, field = %field, "Entry updated");
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::Kind;
    use tempfile::tempdir;

    fn note(module: &str) -> Entry {
        Entry::new(Kind::Note, module, "content")
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = EntryStore::open(dir.path().join("data.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_next_id() {
        assert_eq!(EntryStore::next_id(&[]), Some(1));

        let mut a = note("a");
        a.id = 4;
        let mut b = note("b");
        b.id = 149;
        assert_eq!(EntryStore::next_id(&[b, a]), Some(150));
    }

    #[test]
    fn test_append_after_max_id_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"[{"ID": 18446744073709551615, "Kind": "Note", "Module": "M", "Description": "D"}]"#,
        )
        .unwrap();
        let store = EntryStore::open(&path);
        let before = fs::read_to_string(&path).unwrap();

        assert!(matches!(
            store.append(note("x")),
            Err(StoreError::IdExhausted { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_append_ids_are_monotonic() {
        let dir = tempdir().unwrap();
        let store = EntryStore::open(dir.path().join("nested").join("data.json"));

        let ids: Vec<u64> = (0..5)
            .map(|i| store.append(note(&format!("m{}", i))).unwrap().id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let stored: Vec<u64> = store.load().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(stored, ids);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = EntryStore::open(dir.path().join("data.json"));

        store
            .append(Entry::issue("2.1", "Login lỗi", "Auth", "Token hết hạn", "Làm mới token"))
            .unwrap();
        store.append(Entry::new(Kind::Logic, "Billing", "a; b; c")).unwrap();

        let first = store.load().unwrap();
        store.save(&first).unwrap();
        let second = store.load().unwrap();
        assert_eq!(first, second);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("Login lỗi"));
        assert!(raw.contains("\n  {\n    \"ID\": 1,"));
    }

    #[test]
    fn test_update_field() {
        let dir = tempdir().unwrap();
        let store = EntryStore::open(dir.path().join("data.json"));
        store.append(note("Auth")).unwrap();

        let updated = store.update_field(1, "module", "Payments").unwrap().unwrap();
        assert_eq!(updated.module, "Payments");
        assert_eq!(store.find_by_id(1).unwrap().unwrap().module, "Payments");

        assert!(store.update_field(42, "Module", "x").unwrap().is_none());
    }

    #[test]
    fn test_update_field_rejects_id() {
        let dir = tempdir().unwrap();
        let store = EntryStore::open(dir.path().join("data.json"));
        store.append(note("Auth")).unwrap();
        let before = store.load().unwrap();

        let err = store.update_field(1, "ID", "99").unwrap_err();
        assert!(matches!(err, StoreError::UnknownField(_)));
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn test_malformed_collection_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "[{ not json").unwrap();

        let store = EntryStore::open(&path);
        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));
        assert!(store.append(note("x")).is_err());
    }

    #[test]
    fn test_unwritable_medium_is_reported() {
        let dir = tempdir().unwrap();
        // Parent is a file, so the directory cannot be created
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = EntryStore::open(blocker.join("data.json"));

        assert!(matches!(
            store.append(note("x")),
            Err(StoreError::Write { .. })
        ));
    }
}
