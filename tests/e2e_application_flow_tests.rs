//! End-to-end tests for the full application flow: post a job, apply, hand
//! the record off to the next view, and keep the applied answer stable when
//! parts of the store go missing.

mod common;

use common::{application, job, EventCollector, TestStore};
use jobmirror::applications::{ApplicationStatus, ApplicationsRepository};
use jobmirror::events::{ApplicationAction, DomainEvent};
use jobmirror::jobs::{JobDraft, JobUpdate};
use jobmirror::reconciler::Handoff;
use jobmirror::storage::keys;

#[test]
fn test_post_apply_and_list() {
    let store = TestStore::new();

    let posted = store
        .jobs
        .create(JobDraft {
            title: "Data Engineer".into(),
            description: "Pipelines".into(),
            location: "Remote".into(),
            requirements: "Rust".into(),
            recruiter_id: "rec-1".into(),
            company_name: Some("Acme".into()),
        })
        .unwrap();

    let record = store
        .applications
        .add(application(posted.id, "u1"))
        .unwrap();

    assert_eq!(record.job_id, posted.id);
    assert_eq!(record.status, ApplicationStatus::Applied);
    assert_eq!(store.applications.list_for_job(posted.id), vec![record.clone()]);
    assert_eq!(store.applications.list_for_user("u1"), vec![record]);
    assert!(store.applications.has_applied(posted.id, "u1"));
}

#[test]
fn test_handoff_bridges_apply_and_next_view() {
    let store = TestStore::new();
    let record = store.applications.add(application(5, "u1")).unwrap();

    // The destination view consumes the sentinel once and merges the fresh
    // record even when its own collection read raced the write.
    let handoff = Handoff::new(store.store.clone());
    assert!(handoff.consume_force_refresh());

    let mut list = Vec::new();
    assert!(handoff.merge_recent_application(&mut list));
    assert_eq!(list, vec![record]);

    // The sentinel is single-shot; a later mount does nothing extra.
    assert!(!handoff.consume_force_refresh());
}

#[test]
fn test_has_applied_survives_collection_wipe_across_views() {
    let store = TestStore::new();
    store.applications.add(application(42, "u1")).unwrap();

    // Simulate a cleared main collection and a lost scratch record.
    store.store.remove(keys::APPLICATIONS).unwrap();
    store.store.remove(keys::MOST_RECENT_APPLICATION).unwrap();

    // A brand new view over the same file has no in-memory snapshot either;
    // the durable marker alone keeps the answer true.
    let (second_store, second_bus) = store.open_second_tab();
    let fresh = ApplicationsRepository::new(second_store, second_bus);
    assert!(fresh.has_applied(42, "u1"));
    assert!(!fresh.has_applied(42, "u2"));
}

#[test]
fn test_duplicate_application_across_views() {
    let store = TestStore::new();
    store.applications.add(application(5, "u1")).unwrap();

    let (second_store, second_bus) = store.open_second_tab();
    let second = ApplicationsRepository::new(second_store, second_bus.clone());
    let events = EventCollector::attach(&second_bus);

    assert!(second.add(application(5, "u1")).is_none());
    assert_eq!(
        events.events(),
        vec![DomainEvent::ApplicationUpdated {
            user_id: Some("u1".into()),
            action: ApplicationAction::AlreadyExists,
            job_id: 5,
        }]
    );
    assert_eq!(store.applications.list_for_job(5).len(), 1);
}

#[test]
fn test_status_update_spans_applicants_and_views() {
    let store = TestStore::new();
    store.applications.add(application(7, "u1")).unwrap();
    store.applications.add(application(7, "u2")).unwrap();

    let updated = store
        .applications
        .update_status_for_job(7, ApplicationStatus::Interviewing);
    assert_eq!(updated.len(), 2);

    let (second_store, second_bus) = store.open_second_tab();
    let second = ApplicationsRepository::new(second_store, second_bus);
    for record in second.list_for_job(7) {
        assert_eq!(record.status, ApplicationStatus::Interviewing);
    }
}

#[test]
fn test_clear_all_wipes_every_view() {
    let store = TestStore::new();
    store.applications.add(application(42, "u1")).unwrap();
    assert!(store.applications.clear_all());

    let (second_store, second_bus) = store.open_second_tab();
    let second = ApplicationsRepository::new(second_store, second_bus);
    assert!(!second.has_applied(42, "u1"));
    assert!(second.list_for_user("u1").is_empty());
}

#[test]
fn test_job_edit_leaves_highlight_scratch_for_next_view() {
    let store = TestStore::new();
    store.jobs.add(job(9));
    let patch = JobUpdate {
        location: Some("Berlin".into()),
        ..Default::default()
    };
    store.jobs.update(9, &patch).unwrap();

    let (second_store, _) = store.open_second_tab();
    let handoff = Handoff::new(second_store);
    let (job_id, timestamp) = handoff.take_job_updated().unwrap();
    assert_eq!(job_id, 9);
    assert!(timestamp > 0);
    assert_eq!(handoff.take_job_updated(), None);
}
