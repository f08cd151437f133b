//! The opaque key-value progress store and its built-in backends.

use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};

/// Error from the underlying key-value store.
///
/// Backends report failures as messages; the session only ever logs or
/// relays them, it never inspects them.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    /// A read failed for a reason other than "key absent".
    #[display("store read failed: {message}")]
    Read { message: String },
    /// A write failed.
    #[display("store write failed: {message}")]
    Write { message: String },
    /// A delete failed.
    #[display("store delete failed: {message}")]
    Delete { message: String },
}

/// An opaque byte-oriented key-value store for puzzle progress.
///
/// Implementations are driven from the session's background worker thread,
/// one request at a time, so they may block freely. An absent key is
/// `Ok(None)`, not an error.
pub trait ProgressStore: Send {
    /// Reads the bytes stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
    /// Removes `key`; removing an absent key succeeds.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// An in-memory store.
///
/// Clones share the same underlying map, which lets embedding hosts and
/// tests keep a handle for inspection while the session's worker owns its
/// own clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cells: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a value without going through the worker; for inspection.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// A file-backed store keeping one file per key under a root directory.
///
/// The root is created lazily on first write. Keys are flattened to
/// filesystem-safe names, so distinct keys should already differ in their
/// alphanumeric/`-`/`_` characters (progress keys do).
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl ProgressStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read {
                message: err.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|err| StoreError::Write {
            message: err.to_string(),
        })?;
        fs::write(self.path_for(key), value).map_err(|err| StoreError::Write {
            message: err.to_string(),
        })
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Delete {
                message: err.to_string(),
            }),
        }
    }
}
