use super::backend::StorageBackend;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::warn;

/// Typed access to named, JSON-array-shaped collections on a [`StorageBackend`].
///
/// Every collection lives under one key as a single serialized array. Reads
/// always go to the backend, never to a cached copy. A value that is missing
/// is an empty collection; a value that is present but corrupted (not JSON,
/// not an array, or an array whose elements no longer match the expected
/// shape) is silently reset to `[]` so that a bad write can never wedge the
/// UI.
#[derive(Clone)]
pub struct CollectionStore {
    backend: Arc<dyn StorageBackend>,
}

impl CollectionStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Load the collection stored under `key`.
    ///
    /// Missing key -> empty vec, nothing written. Corrupted value -> the key
    /// is overwritten with `[]` and an empty vec is returned; no error
    /// reaches the caller for corruption.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let raw = match self.backend.get(key).context("storage read failed")? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        let value: JsonValue = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("Collection {} holds invalid JSON ({}), resetting", key, err);
                return self.heal(key);
            }
        };

        if !value.is_array() {
            warn!("Collection {} is not an array, resetting", key);
            return self.heal(key);
        }

        match serde_json::from_value(value) {
            Ok(items) => Ok(items),
            Err(err) => {
                warn!(
                    "Collection {} has elements of unexpected shape ({}), resetting",
                    key, err
                );
                self.heal(key)
            }
        }
    }

    /// Serialize and write the whole collection under `key`.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items).context("collection serialization failed")?;
        self.backend.set(key, &raw).context("storage write failed")?;
        Ok(())
    }

    /// Like [`load`](Self::load), but when the key is absent the provided
    /// default is written and returned.
    pub fn load_or_init<T: DeserializeOwned + Serialize>(
        &self,
        key: &str,
        default: Vec<T>,
    ) -> Result<Vec<T>> {
        if self.backend.get(key).context("storage read failed")?.is_none() {
            self.save(key, &default)?;
            return Ok(default);
        }
        self.load(key)
    }

    /// Read a single non-array scratch value.
    pub fn get_scratch<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw = match self.backend.get(key).context("storage read failed")? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("Scratch value {} is unreadable ({}), dropping", key, err);
                self.backend.remove(key).context("storage remove failed")?;
                Ok(None)
            }
        }
    }

    /// Write a single non-array scratch value.
    pub fn set_scratch<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).context("scratch serialization failed")?;
        self.backend.set(key, &raw).context("storage write failed")?;
        Ok(())
    }

    /// Read a raw string value (used for plain sentinels, not JSON).
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.backend.get(key).context("storage read failed")
    }

    /// Write a raw string value.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set(key, value).context("storage write failed")
    }

    /// Delete a key. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove(key).context("storage remove failed")
    }

    fn heal<T>(&self, key: &str) -> Result<Vec<T>> {
        self.backend
            .set(key, "[]")
            .context("storage write failed while healing")?;
        Ok(Vec::new())
    }
}
