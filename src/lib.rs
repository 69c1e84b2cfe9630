//! Jobmirror Library
//!
//! Client-local persisted-state synchronization layer for a job board.
//! The local store is the authoritative source for rendering; the remote
//! backend is mirrored best-effort. Collections live as JSON arrays in a
//! key/value store, repositories own one collection each, an in-process
//! event bus broadcasts changes, and the reconciler heals whatever the bus
//! cannot reach.

pub mod applications;
pub mod config;
pub mod events;
pub mod jobs;
pub mod reconciler;
pub mod remote;
pub mod saved_jobs;
pub mod storage;

// Re-export commonly used types for convenience
pub use applications::{ApplicationDraft, ApplicationRecord, ApplicationStatus, ApplicationsRepository};
pub use events::{DomainEvent, EventBus, Subscription};
pub use jobs::{JobDraft, JobsRepository, LocalJob};
pub use reconciler::Handoff;
pub use saved_jobs::{SavedJobRecord, SavedJobsRepository};
pub use storage::{CollectionStore, MemoryStorage, SqliteStorage, StorageBackend};
