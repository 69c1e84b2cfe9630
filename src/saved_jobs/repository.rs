use super::models::SavedJobRecord;
use crate::events::{DomainEvent, EventBus, SavedAction};
use crate::jobs::LocalJob;
use crate::remote::{self, RemoteApi};
use crate::storage::{keys, CollectionStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Repository over the saved-jobs collection.
///
/// Answers and mutations always re-read the collection from storage first;
/// a cached copy of the heart-icon state is exactly the stale-view bug this
/// layer exists to avoid.
pub struct SavedJobsRepository {
    store: CollectionStore,
    bus: Arc<EventBus>,
    remote: Option<Arc<dyn RemoteApi>>,
}

impl SavedJobsRepository {
    pub fn new(store: CollectionStore, bus: Arc<EventBus>) -> Self {
        Self {
            store,
            bus,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteApi>) -> Self {
        self.remote = Some(remote);
        self
    }

    fn load(&self) -> Vec<SavedJobRecord> {
        match self.store.load(keys::SAVED_JOBS) {
            Ok(records) => records,
            Err(err) => {
                warn!("Failed to load saved jobs: {:#}", err);
                Vec::new()
            }
        }
    }

    /// Whether the user has saved this job. Always answered from a fresh
    /// storage read.
    pub fn is_saved(&self, job_id: i64, user_id: &str) -> bool {
        self.load()
            .iter()
            .any(|record| record.job_id == job_id && record.user_id == user_id)
    }

    pub fn list_for_user(&self, user_id: &str) -> Vec<SavedJobRecord> {
        self.load()
            .into_iter()
            .filter(|record| record.user_id == user_id)
            .collect()
    }

    pub fn count_for_user(&self, user_id: &str) -> usize {
        self.list_for_user(user_id).len()
    }

    /// Save a job for a user. Idempotent: if the pair already exists the
    /// existing record is returned unchanged and no event fires. Returns
    /// `None` when `user_id` is missing.
    pub fn add(&self, job: &LocalJob, user_id: &str) -> Option<SavedJobRecord> {
        if user_id.is_empty() {
            warn!("Rejecting save with missing user id for job {}", job.id);
            return None;
        }

        let mut records = self.load();
        if let Some(existing) = records
            .iter()
            .find(|record| record.job_id == job.id && record.user_id == user_id)
        {
            debug!("Job {} already saved by {}, keeping it", job.id, user_id);
            return Some(existing.clone());
        }

        let record = SavedJobRecord::new(job, user_id);
        records.push(record.clone());

        if let Err(err) = self.store.save(keys::SAVED_JOBS, &records) {
            warn!("Failed to persist saved jobs: {:#}", err);
            return None;
        }

        self.bus.publish(DomainEvent::SavedUpdated {
            user_id: user_id.to_string(),
            action: SavedAction::Added,
            job_id: job.id,
        });

        if let Some(remote) = &self.remote {
            remote::mirror("saveJob", remote.save_job(job.id, user_id));
        }

        Some(record)
    }

    /// Unsave a job. Returns whether a record was actually removed.
    pub fn remove(&self, job_id: i64, user_id: &str) -> bool {
        let mut records = self.load();
        let Some(index) = records
            .iter()
            .position(|record| record.job_id == job_id && record.user_id == user_id)
        else {
            return false;
        };

        records.remove(index);
        if let Err(err) = self.store.save(keys::SAVED_JOBS, &records) {
            warn!("Failed to persist saved jobs after removal: {:#}", err);
            return false;
        }

        self.bus.publish(DomainEvent::SavedUpdated {
            user_id: user_id.to_string(),
            action: SavedAction::Removed,
            job_id,
        });

        if let Some(remote) = &self.remote {
            remote::mirror("removeSavedJob", remote.remove_saved_job(job_id, user_id));
        }

        true
    }
}
