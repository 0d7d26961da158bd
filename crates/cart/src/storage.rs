//! Persistent key/value storage for cart slots.
//!
//! A cart persists as one JSON value under a named slot in a
//! [`KeyValueStore`]. Two backends are provided: [`MemoryStore`] for tests
//! and ephemeral carts, and [`FileStore`] for durable per-visitor slots under
//! a data directory. [`CartStorage`] binds a store to a single slot and owns
//! the load/save semantics, including recovery from unreadable data.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::line_item::LineItem;

/// Slot name used when a cart is not bound to a particular visitor.
pub const DEFAULT_SLOT: &str = "cart";

/// Errors raised by storage backends and the slot adapter.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failure from a file-backed store.
    #[error("storage i/o failure: {0}")]
    Io(#[from] io::Error),

    /// The cart could not be serialized for writing.
    #[error("cart serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A slot name that cannot be mapped to a storage location.
    #[error("invalid slot name: {0:?}")]
    InvalidKey(String),

    /// A store mutex was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-keyed, string-valued persistent store.
///
/// Methods take `&self` so a single store can be shared across carts bound
/// to different slots; backends use interior mutability where they need it.
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read. An absent key is
    /// `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// File Store
// ============================================================================

/// File-per-slot store rooted at a data directory.
///
/// Each key maps to `<root>/<key>.json`. Keys must be simple names; anything
/// containing a path separator or `..` is rejected so a key can never escape
/// the root directory. The root is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write, not here.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory this store writes under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty()
            || key.contains(['/', '\\'])
            || key.split('.').any(|part| part.is_empty())
        {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error)),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        fs::write(&path, value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::Io(error)),
        }
    }
}

// ============================================================================
// Slot adapter
// ============================================================================

/// A [`KeyValueStore`] bound to one cart slot.
///
/// `load` and `save` move whole item lists in and out of the slot. A stored
/// value that no longer parses is logged, deleted, and treated as an empty
/// cart; parse problems never reach the caller.
#[derive(Debug)]
pub struct CartStorage<S> {
    store: S,
    slot: String,
}

impl<S: KeyValueStore> CartStorage<S> {
    /// Bind `store` to the default slot.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_slot(store, DEFAULT_SLOT)
    }

    /// Bind `store` to a named slot, e.g. one slot per visitor token.
    #[must_use]
    pub fn with_slot(store: S, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    /// The slot name this storage reads and writes.
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Read the persisted item list.
    ///
    /// An absent slot is an empty cart. A present value that fails to parse
    /// is logged at warn level, the slot is deleted, and an empty list is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend read/write failures, never for
    /// unparseable data.
    pub fn load(&self) -> Result<Vec<LineItem>, StorageError> {
        let Some(raw) = self.store.get(&self.slot)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(error) => {
                tracing::warn!(slot = %self.slot, %error, "discarding unreadable cart data");
                self.store.delete(&self.slot)?;
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the slot with `items`, unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&self, items: &[LineItem]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.store.put(&self.slot, &raw)
    }
}
