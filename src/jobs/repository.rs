use super::models::{JobDraft, JobUpdate, LocalJob};
use crate::events::{DomainEvent, EventBus};
use crate::reconciler::Handoff;
use crate::remote::{self, RemoteApi};
use crate::storage::{keys, CollectionStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Repository over the locally created jobs collection.
///
/// Every mutation re-reads the collection from storage, applies the change,
/// and writes the whole collection back within the same call, then publishes
/// a change event. Storage failures degrade to empty results; they never
/// propagate to callers.
pub struct JobsRepository {
    store: CollectionStore,
    bus: Arc<EventBus>,
    remote: Option<Arc<dyn RemoteApi>>,
}

impl JobsRepository {
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

    /// All locally created jobs, newest first.
    pub fn list_all(&self) -> Vec<LocalJob> {
        match self.store.load(keys::CREATED_JOBS) {
            Ok(jobs) => jobs,
            Err(err) => {
                warn!("Failed to load created jobs: {:#}", err);
                Vec::new()
            }
        }
    }

    pub fn get_by_id(&self, job_id: i64) -> Option<LocalJob> {
        self.list_all().into_iter().find(|job| job.id == job_id)
    }

    pub fn list_for_recruiter(&self, recruiter_id: &str) -> Vec<LocalJob> {
        self.list_all()
            .into_iter()
            .filter(|job| job.recruiter_id == recruiter_id)
            .collect()
    }

    /// Post a new job. Returns `None` when a required field is missing.
    pub fn create(&self, draft: JobDraft) -> Option<LocalJob> {
        if draft.title.is_empty()
            || draft.description.is_empty()
            || draft.location.is_empty()
            || draft.requirements.is_empty()
            || draft.recruiter_id.is_empty()
        {
            warn!("Rejecting job draft with missing required fields");
            return None;
        }

        let job = draft.into_job();
        self.add(job.clone());

        if let Some(remote) = &self.remote {
            remote::mirror("addNewJob", remote.add_new_job(&job));
        }

        Some(job)
    }

    /// Insert a full job record, idempotently by id.
    ///
    /// If a job with the same id already exists the collection is returned
    /// unchanged and no event fires. Otherwise the normalized job is
    /// prepended and a `job-added` event is published.
    pub fn add(&self, job: LocalJob) -> Vec<LocalJob> {
        let job = job.normalized();
        let mut jobs = self.list_all();

        if jobs.iter().any(|existing| existing.id == job.id) {
            debug!("Job {} already present, keeping existing entry", job.id);
            return jobs;
        }

        jobs.insert(0, job.clone());
        if let Err(err) = self.store.save(keys::CREATED_JOBS, &jobs) {
            warn!("Failed to persist created jobs: {:#}", err);
            return Vec::new();
        }

        info!("Added job {} ({})", job.id, job.title);
        self.bus.publish(DomainEvent::JobAdded { job });
        jobs
    }

    /// Remove a job by id. Removing an id that is not present is a no-op
    /// success; the `job-removed` event fires either way.
    pub fn remove(&self, job_id: i64) -> Vec<LocalJob> {
        let mut jobs = self.list_all();
        jobs.retain(|job| job.id != job_id);

        if let Err(err) = self.store.save(keys::CREATED_JOBS, &jobs) {
            warn!("Failed to persist created jobs after removal: {:#}", err);
            return Vec::new();
        }

        self.bus.publish(DomainEvent::JobRemoved { job_id });

        if let Some(remote) = &self.remote {
            remote::mirror("deleteJob", remote.delete_job(job_id));
        }

        jobs
    }

    /// Apply an edit patch to a job. Records the just-updated scratch pair so
    /// the destination page can highlight the edited job after navigation.
    pub fn update(&self, job_id: i64, patch: &JobUpdate) -> Option<LocalJob> {
        let mut jobs = self.list_all();
        let job = jobs.iter_mut().find(|job| job.id == job_id)?;
        patch.apply_to(job);
        let updated = job.clone();

        if let Err(err) = self.store.save(keys::CREATED_JOBS, &jobs) {
            warn!("Failed to persist job update: {:#}", err);
            return None;
        }

        Handoff::new(self.store.clone()).mark_job_updated(job_id);
        self.bus.publish(DomainEvent::JobUpdated { job_id });

        if let Some(remote) = &self.remote {
            remote::mirror("updateJob", remote.update_job(&updated));
        }

        Some(updated)
    }

    /// Flip the hiring flag on a job.
    pub fn set_hiring_status(&self, job_id: i64, is_open: bool) -> Option<LocalJob> {
        let mut jobs = self.list_all();
        let job = jobs.iter_mut().find(|job| job.id == job_id)?;
        job.is_open = is_open;
        let updated = job.clone();

        if let Err(err) = self.store.save(keys::CREATED_JOBS, &jobs) {
            warn!("Failed to persist hiring status: {:#}", err);
            return None;
        }

        self.bus.publish(DomainEvent::JobUpdated { job_id });

        if let Some(remote) = &self.remote {
            remote::mirror(
                "updateHiringStatus",
                remote.update_hiring_status(job_id, is_open),
            );
        }

        Some(updated)
    }

    /// Drop the whole collection.
    pub fn clear(&self) {
        if let Err(err) = self.store.remove(keys::CREATED_JOBS) {
            warn!("Failed to clear created jobs: {:#}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::JobDraft;
    use crate::storage::MemoryStorage;
    use std::sync::Mutex;

    fn repo() -> (JobsRepository, Arc<EventBus>) {
        let store = CollectionStore::new(Arc::new(MemoryStorage::new()));
        let bus = EventBus::new();
        (JobsRepository::new(store, bus.clone()), bus)
    }

    fn draft(title: &str) -> JobDraft {
        JobDraft {
            title: title.into(),
            description: "desc".into(),
            location: "Remote".into(),
            requirements: "Rust".into(),
            recruiter_id: "rec-1".into(),
            company_name: Some("Acme".into()),
        }
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let (repo, _bus) = repo();
        let mut incomplete = draft("Engineer");
        incomplete.title = String::new();
        assert!(repo.create(incomplete).is_none());
        assert!(repo.list_all().is_empty());
    }

    #[test]
    fn test_create_then_list() {
        let (repo, _bus) = repo();
        let job = repo.create(draft("Engineer")).unwrap();
        assert!(job.is_open);
        assert_eq!(job.company.name, "Acme");

        let jobs = repo.list_all();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, job.id);
    }

    #[test]
    fn test_add_is_idempotent_by_id() {
        let (repo, _bus) = repo();
        let job = repo.create(draft("Engineer")).unwrap();
        let jobs = repo.add(job.clone());
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn test_add_prepends_newest_first() {
        let (repo, _bus) = repo();
        let first = repo.create(draft("First")).unwrap();
        let mut second = first.clone();
        second.id = first.id + 1;
        second.title = "Second".into();
        repo.add(second);

        let jobs = repo.list_all();
        assert_eq!(jobs[0].title, "Second");
        assert_eq!(jobs[1].title, "First");
    }

    #[test]
    fn test_remove_missing_id_is_noop_success() {
        let (repo, bus) = repo();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let _sub = bus.subscribe(move |event| seen_clone.lock().unwrap().push(event.clone()));

        let jobs = repo.remove(999);
        assert!(jobs.is_empty());
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[DomainEvent::JobRemoved { job_id: 999 }]
        );
    }

    #[test]
    fn test_update_patches_and_publishes() {
        let (repo, bus) = repo();
        let job = repo.create(draft("Engineer")).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let _sub = bus.subscribe(move |event| seen_clone.lock().unwrap().push(event.clone()));

        let patch = JobUpdate {
            location: Some("Berlin".into()),
            ..Default::default()
        };
        let updated = repo.update(job.id, &patch).unwrap();
        assert_eq!(updated.location, "Berlin");
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[DomainEvent::JobUpdated { job_id: job.id }]
        );
        assert_eq!(repo.get_by_id(job.id).unwrap().location, "Berlin");
    }

    #[test]
    fn test_update_unknown_job_returns_none() {
        let (repo, _bus) = repo();
        assert!(repo.update(1, &JobUpdate::default()).is_none());
    }

    #[test]
    fn test_set_hiring_status() {
        let (repo, _bus) = repo();
        let job = repo.create(draft("Engineer")).unwrap();
        let updated = repo.set_hiring_status(job.id, false).unwrap();
        assert!(!updated.is_open);
        assert!(!repo.get_by_id(job.id).unwrap().is_open);
    }

    #[test]
    fn test_clear_drops_the_collection() {
        let (repo, _bus) = repo();
        repo.create(draft("Engineer")).unwrap();
        repo.clear();
        assert!(repo.list_all().is_empty());
    }

    #[test]
    fn test_list_for_recruiter_filters() {
        let (repo, _bus) = repo();
        let mine = repo.create(draft("Mine")).unwrap();
        let mut other = mine.clone();
        other.id = mine.id + 1;
        other.recruiter_id = "rec-2".into();
        repo.add(other);

        let jobs = repo.list_for_recruiter("rec-1");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Mine");
    }
}
