//! Durable key-value slots.
//!
//! The cart lives in a single string slot, the way a browser keeps it in
//! `localStorage`. [`MemoryStore`] backs tests and ephemeral sessions;
//! [`FileStore`] keeps one file per key in a data directory.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by a key-value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend refused the write because it would exceed its quota.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Bytes the store would hold after the write.
        needed: usize,
        /// Configured limit.
        quota: usize,
    },
    /// The key cannot be mapped to a storage location.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    /// Filesystem failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A string-valued key-value store.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write is rejected or fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store with an optional byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// An empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that rejects writes once keys plus values exceed
    /// `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Bytes currently held, keys included.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Raw access for seeding fixtures.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let existing = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let needed = self.used_bytes() - existing + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-per-key store rooted at a directory.
///
/// Writes land in a uniquely named temporary file that is synced to disk and
/// then renamed over the target, so a crash never leaves a half-written slot
/// behind. A failed write removes its temporary file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding the slots.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

/// Keys map straight to file names, so only a conservative character set is
/// accepted.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Write `value` to `temp`, sync it, then rename it over `target`. On any
/// failure `temp` is removed.
fn write_atomically(temp: &Path, target: &Path, value: &str) -> io::Result<()> {
    let result = write_synced(temp, value).and_then(|()| fs::rename(temp, target));
    if result.is_err() {
        let _ = fs::remove_file(temp);
    }
    result
}

fn write_synced(path: &Path, value: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let target = self.path_for(key)?;
        let temp = self
            .root
            .join(format!(".{key}.{}.tmp", uuid::Uuid::new_v4().simple()));

        write_atomically(&temp, &target, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
