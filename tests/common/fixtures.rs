use jobmirror::applications::{ApplicationDraft, ApplicationsRepository};
use jobmirror::events::{DomainEvent, EventBus, Subscription};
use jobmirror::jobs::{Company, JobsRepository, LocalJob};
use jobmirror::saved_jobs::SavedJobsRepository;
use jobmirror::storage::{CollectionStore, SqliteStorage};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A full local store backed by an on-disk sqlite file, with all three
/// repositories wired to one bus.
pub struct TestStore {
    _dir: TempDir,
    pub db_path: PathBuf,
    pub store: CollectionStore,
    pub bus: Arc<EventBus>,
    pub jobs: JobsRepository,
    pub saved: SavedJobsRepository,
    pub applications: ApplicationsRepository,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let db_path = dir.path().join("local-store.db");
        let storage = Arc::new(SqliteStorage::new(&db_path).expect("failed to open store"));
        let store = CollectionStore::new(storage);
        let bus = EventBus::new();

        Self {
            jobs: JobsRepository::new(store.clone(), bus.clone()),
            saved: SavedJobsRepository::new(store.clone(), bus.clone()),
            applications: ApplicationsRepository::new(store.clone(), bus.clone()),
            _dir: dir,
            db_path,
            store,
            bus,
        }
    }

    /// A second, independent view of the same database file, with its own
    /// bus and repositories. Events do not cross between the two; only the
    /// shared storage does. This models a second browser tab.
    pub fn open_second_tab(&self) -> (CollectionStore, Arc<EventBus>) {
        let storage = Arc::new(SqliteStorage::new(&self.db_path).expect("failed to reopen store"));
        (CollectionStore::new(storage), EventBus::new())
    }
}

/// Records every event published on a bus for later assertions.
pub struct EventCollector {
    events: Arc<Mutex<Vec<DomainEvent>>>,
    _sub: Subscription,
}

impl EventCollector {
    pub fn attach(bus: &Arc<EventBus>) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        let sub = bus.subscribe(move |event| {
            events_clone.lock().unwrap().push(event.clone());
        });
        Self { events, _sub: sub }
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

/// A job fixture with a fixed id, bypassing draft id generation.
pub fn job(id: i64) -> LocalJob {
    LocalJob {
        id,
        title: format!("Job {}", id),
        description: "Build and run the data pipeline".into(),
        location: "Remote".into(),
        requirements: "3+ years Rust".into(),
        recruiter_id: "rec-1".into(),
        is_open: true,
        company: Company {
            name: "Acme".into(),
            logo_url: "/companies/acme.png".into(),
        },
        company_name: None,
        pin_code: None,
        phone_number: None,
        created_at: "2024-01-01T00:00:00Z".into(),
        saved: Vec::new(),
        applications: Vec::new(),
    }
}

pub fn application(job_id: i64, candidate_id: &str) -> ApplicationDraft {
    ApplicationDraft {
        job_id,
        candidate_id: candidate_id.into(),
        name: Some("Dana".into()),
        experience: Some(4),
        skills: Some("rust, sql".into()),
        ..Default::default()
    }
}
