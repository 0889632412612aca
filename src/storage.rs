//! String key/value storage backends under the token store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client persists into `localStorage` (implemented in the
//! `client` crate), the CLI into a JSON file, and tests into memory. All three
//! speak the same `get`/`set`/`remove` shape as the Web Storage API so the
//! token store above them is backend-agnostic.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// Errors produced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a flat JSON string map.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The platform refused the operation (e.g. browser quota, private mode).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Minimal key/value persistence contract.
///
/// Implementations must be `Send + Sync` so a session manager built on them
/// can live in shared UI context.
pub trait StorageBackend: Send + Sync {
    /// Read the value for `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Store several entries in one step.
    ///
    /// The default writes them one at a time. If a write fails, the keys
    /// already written get their previous values back (or are removed if
    /// they were absent), so the batch lands whole or not at all. Backends
    /// that can commit a batch atomically should override it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on the first entry that fails, or if the
    /// previous values cannot be read.
    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let previous = entries.iter().map(|(key, _)| self.get(key)).collect::<Result<Vec<_>, _>>()?;
        for (i, (key, value)) in entries.iter().enumerate() {
            if let Err(e) = self.set(key, value) {
                for ((written, _), old) in entries[..i].iter().zip(&previous) {
                    let restored = match old {
                        Some(old) => self.set(written, old),
                        None => self.remove(written),
                    };
                    if let Err(rollback) = restored {
                        tracing::warn!(key = %written, error = %rollback, "storage rollback failed");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// Remove several keys in one step.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on the first key that fails.
    fn remove_entries(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }

    fn set_entries(&self, batch: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in batch {
            entries.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }

    fn remove_entries(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};
    use std::sync::{Mutex, PoisonError};

    use super::{StorageBackend, StorageError};

    /// Flat JSON object on disk, rewritten whole on every mutation.
    ///
    /// Writes go to a sibling temp file that is renamed over the target, so a
    /// reader sees either the previous map or the new one, never a mix.
    #[derive(Debug)]
    pub struct FileStorage {
        path: PathBuf,
        write_lock: Mutex<()>,
    }

    impl FileStorage {
        #[must_use]
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into(), write_lock: Mutex::new(()) }
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
            match fs::read(&self.path) {
                Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
                Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn commit(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
            if entries.is_empty() {
                return match fs::remove_file(&self.path) {
                    Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                    _ => Ok(()),
                };
            }
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut tmp = self.path.clone().into_os_string();
            tmp.push(".tmp");
            let tmp = PathBuf::from(tmp);
            fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
            fs::rename(&tmp, &self.path)?;
            tracing::debug!(path = %self.path.display(), entries = entries.len(), "storage file written");
            Ok(())
        }

        fn mutate(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StorageError> {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            // Unreadable contents are replaced, never merged into.
            let mut entries = match self.load() {
                Err(StorageError::Corrupt(e)) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "discarding corrupt storage file");
                    BTreeMap::new()
                }
                loaded => loaded?,
            };
            apply(&mut entries);
            self.commit(&entries)
        }
    }

    impl StorageBackend for FileStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.load()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.mutate(|entries| {
                entries.insert(key.to_owned(), value.to_owned());
            })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.mutate(|entries| {
                entries.remove(key);
            })
        }

        fn set_entries(&self, batch: &[(&str, &str)]) -> Result<(), StorageError> {
            self.mutate(|entries| {
                for (key, value) in batch {
                    entries.insert((*key).to_owned(), (*value).to_owned());
                }
            })
        }

        fn remove_entries(&self, keys: &[&str]) -> Result<(), StorageError> {
            self.mutate(|entries| {
                for key in keys {
                    entries.remove(*key);
                }
            })
        }
    }
}
