use super::models::{ApplicationDraft, ApplicationRecord, ApplicationStatus, AppliedJobMarker};
use crate::events::{ApplicationAction, DomainEvent, EventBus};
use crate::reconciler::Handoff;
use crate::remote::{self, RemoteApi};
use crate::storage::{keys, CollectionStore};
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Repository over the applications collection.
///
/// Besides the main collection this repository maintains two extra signals
/// that make "has this user applied?" robust against a cleared or corrupted
/// collection: the durable `permanentAppliedJobs` index and the
/// `mostRecentApplication` scratch record. A last-read in-memory snapshot is
/// kept as a fourth signal so a wiped key does not flip an answer within the
/// same session.
pub struct ApplicationsRepository {
    store: CollectionStore,
    bus: Arc<EventBus>,
    remote: Option<Arc<dyn RemoteApi>>,
    snapshot: Mutex<Vec<ApplicationRecord>>,
}

impl ApplicationsRepository {
    pub fn new(store: CollectionStore, bus: Arc<EventBus>) -> Self {
        Self {
            store,
            bus,
            remote: None,
            snapshot: Mutex::new(Vec::new()),
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteApi>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Fresh read of the whole collection; refreshes the in-memory snapshot.
    fn load(&self) -> Vec<ApplicationRecord> {
        let records: Vec<ApplicationRecord> = match self.store.load(keys::APPLICATIONS) {
            Ok(records) => records,
            Err(err) => {
                warn!("Failed to load applications: {:#}", err);
                return Vec::new();
            }
        };
        if let Ok(mut snapshot) = self.snapshot.lock() {
            *snapshot = records.clone();
        }
        records
    }

    fn persist(&self, records: &[ApplicationRecord]) -> bool {
        match self.store.save(keys::APPLICATIONS, records) {
            Ok(()) => {
                if let Ok(mut snapshot) = self.snapshot.lock() {
                    *snapshot = records.to_vec();
                }
                true
            }
            Err(err) => {
                warn!("Failed to persist applications: {:#}", err);
                false
            }
        }
    }

    /// Submit an application. Enforces one application per (job, candidate):
    /// a duplicate returns `None` and publishes an `already-exists` event.
    ///
    /// A successful add also records the durable applied marker and the
    /// most-recent-application handoff, so the destination page can show the
    /// new record even if it mounts before any event is observed.
    pub fn add(&self, draft: ApplicationDraft) -> Option<ApplicationRecord> {
        if draft.job_id <= 0 || draft.candidate_id.is_empty() {
            warn!("Rejecting application with missing job or candidate id");
            return None;
        }

        let job_id = draft.job_id;
        let candidate_id = draft.candidate_id.clone();

        let mut records = self.load();
        if records
            .iter()
            .any(|record| record.job_id == job_id && record.candidate_id == candidate_id)
        {
            debug!("User {} already applied to job {}", candidate_id, job_id);
            self.bus.publish(DomainEvent::ApplicationUpdated {
                user_id: Some(candidate_id),
                action: ApplicationAction::AlreadyExists,
                job_id,
            });
            return None;
        }

        let record = draft.into_record();
        records.push(record.clone());
        if !self.persist(&records) {
            return None;
        }

        info!("Application {} added for job {}", record.id, job_id);
        self.bus.publish(DomainEvent::ApplicationUpdated {
            user_id: Some(candidate_id.clone()),
            action: ApplicationAction::Added,
            job_id,
        });

        self.store_applied_marker(job_id, &candidate_id);
        Handoff::new(self.store.clone()).record_recent_application(&record);

        if let Some(remote) = &self.remote {
            remote::mirror("applyToJob", remote.apply_to_job(&record));
        }

        Some(record)
    }

    /// Whether the user has ever applied to this job.
    ///
    /// OR across four independent signals: the last in-memory snapshot, a
    /// fresh storage read, the durable applied marker, and the most-recent
    /// scratch record. Any single surviving signal keeps the answer `true`;
    /// there is deliberately no per-pair way to unset it (only
    /// [`clear_all`](Self::clear_all) resets everything).
    pub fn has_applied(&self, job_id: i64, user_id: &str) -> bool {
        if job_id <= 0 || user_id.is_empty() {
            return false;
        }

        let in_snapshot = self
            .snapshot
            .lock()
            .map(|snapshot| {
                snapshot
                    .iter()
                    .any(|r| r.job_id == job_id && r.candidate_id == user_id)
            })
            .unwrap_or(false);

        let in_collection = self
            .load()
            .iter()
            .any(|r| r.job_id == job_id && r.candidate_id == user_id);

        let in_permanent_index = match self
            .store
            .load::<AppliedJobMarker>(keys::PERMANENT_APPLIED_JOBS)
        {
            Ok(markers) => markers
                .iter()
                .any(|m| m.job_id == job_id && m.user_id == user_id),
            Err(err) => {
                warn!("Failed to read permanent applied jobs: {:#}", err);
                false
            }
        };

        let in_recent_scratch = Handoff::new(self.store.clone())
            .recent_application()
            .map(|r| r.job_id == job_id && r.candidate_id == user_id)
            .unwrap_or(false);

        in_snapshot || in_collection || in_permanent_index || in_recent_scratch
    }

    pub fn list_for_user(&self, user_id: &str) -> Vec<ApplicationRecord> {
        if user_id.is_empty() {
            return Vec::new();
        }
        self.load()
            .into_iter()
            .filter(|record| record.candidate_id == user_id)
            .collect()
    }

    pub fn list_for_job(&self, job_id: i64) -> Vec<ApplicationRecord> {
        self.load()
            .into_iter()
            .filter(|record| record.job_id == job_id)
            .collect()
    }

    /// Move every application on a job to the given status.
    ///
    /// The transition is applied per job, not per record: all applicants to
    /// the job change together. Returns the updated records.
    pub fn update_status_for_job(
        &self,
        job_id: i64,
        status: ApplicationStatus,
    ) -> Vec<ApplicationRecord> {
        let mut records = self.load();
        let mut updated = Vec::new();
        for record in records.iter_mut() {
            if record.job_id == job_id {
                record.status = status;
                updated.push(record.clone());
            }
        }

        if updated.is_empty() {
            return Vec::new();
        }
        if !self.persist(&records) {
            return Vec::new();
        }

        info!(
            "Updated {} applications on job {} to {}",
            updated.len(),
            job_id,
            status
        );
        self.bus.publish(DomainEvent::ApplicationUpdated {
            user_id: None,
            action: ApplicationAction::StatusUpdated,
            job_id,
        });

        if let Some(remote) = &self.remote {
            remote::mirror(
                "updateApplicationStatus",
                remote.update_application_status(job_id, status),
            );
        }

        updated
    }

    /// Wipe every application signal: the main collection, the durable
    /// applied markers, and the most-recent scratch record.
    pub fn clear_all(&self) -> bool {
        let result = self
            .store
            .remove(keys::APPLICATIONS)
            .and_then(|_| self.store.remove(keys::PERMANENT_APPLIED_JOBS))
            .and_then(|_| self.store.remove(keys::MOST_RECENT_APPLICATION));

        if let Err(err) = result {
            warn!("Failed to clear applications: {:#}", err);
            return false;
        }

        if let Ok(mut snapshot) = self.snapshot.lock() {
            snapshot.clear();
        }

        self.bus.publish(DomainEvent::ApplicationsCleared);
        true
    }

    /// Record the durable `{jobId, userId, timestamp}` marker, idempotently.
    fn store_applied_marker(&self, job_id: i64, user_id: &str) {
        let mut markers: Vec<AppliedJobMarker> =
            match self.store.load(keys::PERMANENT_APPLIED_JOBS) {
                Ok(markers) => markers,
                Err(err) => {
                    warn!("Failed to read permanent applied jobs: {:#}", err);
                    return;
                }
            };

        if markers
            .iter()
            .any(|m| m.job_id == job_id && m.user_id == user_id)
        {
            return;
        }

        markers.push(AppliedJobMarker {
            job_id,
            user_id: user_id.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        });

        if let Err(err) = self.store.save(keys::PERMANENT_APPLIED_JOBS, &markers) {
            warn!("Failed to persist permanent applied jobs: {:#}", err);
        }
    }
}
