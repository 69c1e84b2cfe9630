//! Persistent key/value storage for the client-local job board mirror.
//!
//! Collections are stored as JSON arrays under well-known keys (see [`keys`]),
//! mirroring the layout the web client keeps in browser local storage.

mod backend;
mod collection_store;
pub mod keys;
mod sqlite_storage;

pub use backend::{MemoryStorage, StorageBackend, StorageError};
pub use collection_store::CollectionStore;
pub use sqlite_storage::SqliteStorage;
