//! Key-value storage backends.
//!
//! Persistence only needs three string operations, so the engine talks to a
//! [`SaveStorage`] trait object. [`MemoryStorage`] backs tests and headless
//! sessions; [`DirStorage`] keeps one file per key under a directory.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// String key-value store holding slot blobs, the registry and the active
/// slot id.
pub trait SaveStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-memory storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SaveStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DirStorage
// ---------------------------------------------------------------------------

/// One file per key inside a root directory.
///
/// Keys are restricted to ASCII letters, digits, `-`, `_` and `.` (and may
/// not start with `.`) so a key can never escape the root.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Use `root`, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl SaveStorage for DirStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    /// Writes `{key}.tmp`, syncs it, then renames over the key so a crash
    /// mid-write leaves the previous value intact.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!("{key}.tmp"));
        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        };
        write().map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(storage: &mut dyn SaveStorage) {
        assert_eq!(storage.get("a-v15-slot-1").unwrap(), None);
        storage.set("a-v15-slot-1", "{}").unwrap();
        assert_eq!(storage.get("a-v15-slot-1").unwrap().as_deref(), Some("{}"));
        storage.set("a-v15-slot-1", "[1]").unwrap();
        assert_eq!(storage.get("a-v15-slot-1").unwrap().as_deref(), Some("[1]"));
        storage.remove("a-v15-slot-1").unwrap();
        assert_eq!(storage.get("a-v15-slot-1").unwrap(), None);
        storage.remove("a-v15-slot-1").unwrap();
    }

    #[test]
    fn memory_storage_basic_operations() {
        let mut storage = MemoryStorage::new();
        exercise(&mut storage);
        storage.set("b", "1").unwrap();
        storage.set("a", "2").unwrap();
        assert_eq!(storage.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn dir_storage_basic_operations() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::open(dir.path().join("saves")).unwrap();
        exercise(&mut storage);
        storage.set("era-tycoon-active-v15", "2").unwrap();
        let on_disk = fs::read_to_string(storage.root().join("era-tycoon-active-v15")).unwrap();
        assert_eq!(on_disk, "2");
        let leftovers: Vec<_> = fs::read_dir(storage.root())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn dir_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::open(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", ".hidden", "sp ace"] {
            assert!(matches!(
                storage.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
