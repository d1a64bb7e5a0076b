//! Durable key-value storage for the session namespace.
//!
//! The store holds four independently-keyed string values (`token`, `id`,
//! `role`, `name`) under one namespace. [`MemoryStore`] is the in-process
//! test double; [`FileStore`] persists the namespace as a single JSON
//! document on disk and re-reads it on every `get`, so a second console
//! process converges after its next read. A torn write surfaces as a parse
//! failure on the next read, which callers degrade to "unauthenticated".

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::StoreError;

/// Storage key for the bearer credential.
pub const KEY_TOKEN: &str = "token";
/// Storage key for the actor ID.
pub const KEY_ID: &str = "id";
/// Storage key for the role tag.
pub const KEY_ROLE: &str = "role";
/// Storage key for the display name.
pub const KEY_NAME: &str = "name";

/// Durable key-value contract for the session namespace.
///
/// All operations are fallible; callers decide whether a failure is
/// propagated or degraded. `clear` wipes the entire namespace, not just the
/// identity keys.
pub trait SessionStore: Send + Sync {
    /// Reads a value, returning `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, overwriting any prior value for the key.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes every key in the namespace. Absent state is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// In-memory store for tests and single-process use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        // A poisoned lock still holds valid string data.
        let values = self
            .values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        values.clear();
        Ok(())
    }
}

/// File-backed store: one JSON object per namespace.
///
/// Every `get` re-reads the file, so concurrent consoles sharing a path
/// observe each other's writes on their next read. `set` rewrites the whole
/// document; there is no multi-key transaction.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the given file path. The file is created
    /// lazily on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(StoreError::Unavailable {
                    details: err.to_string(),
                });
            }
        };
        serde_json::from_str(&contents).map_err(|err| StoreError::Corrupt {
            details: err.to_string(),
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let contents = serde_json::to_string(values).map_err(|err| StoreError::Corrupt {
            details: err.to_string(),
        })?;
        std::fs::write(&self.path, contents).map_err(|err| StoreError::Unavailable {
            details: err.to_string(),
        })
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Unavailable {
                details: err.to_string(),
            }),
        }
    }
}
