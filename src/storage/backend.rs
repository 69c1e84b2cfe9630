use std::collections::HashMap;
use std::sync::Mutex;

/// Errors surfaced by a storage backend.
///
/// Callers above the repository layer never see these; repositories catch
/// them, log, and degrade to empty results.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage lock poisoned")]
    LockPoisoned,

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// The local-storage seam: a flat string key/value store.
///
/// `set` is synchronous and fully replaces the previous value, so within one
/// process readers never observe a partially written value. No locking across
/// processes is provided; see the repository layer for how that window is
/// minimized.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::LockPoisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::LockPoisoned)?;
        values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.keys().cloned().collect())
    }
}
