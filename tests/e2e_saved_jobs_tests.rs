//! End-to-end tests for saved jobs across two independent views of the same
//! store. Events stay within the view that caused them; only storage is
//! shared, so the other view sees changes on its next read.

mod common;

use common::{job, EventCollector, TestStore};
use jobmirror::events::{DomainEvent, SavedAction};
use jobmirror::saved_jobs::SavedJobsRepository;

#[test]
fn test_save_in_one_tab_visible_in_the_other() {
    let store = TestStore::new();
    let (second_store, second_bus) = store.open_second_tab();
    let second_saved = SavedJobsRepository::new(second_store, second_bus);

    assert!(!second_saved.is_saved(1, "u1"));
    store.saved.add(&job(1), "u1").unwrap();
    assert!(second_saved.is_saved(1, "u1"));

    second_saved.remove(1, "u1");
    assert!(!store.saved.is_saved(1, "u1"));
}

#[test]
fn test_events_do_not_cross_tabs() {
    let store = TestStore::new();
    let (second_store, second_bus) = store.open_second_tab();
    let second_saved = SavedJobsRepository::new(second_store, second_bus.clone());

    let first_events = EventCollector::attach(&store.bus);
    let second_events = EventCollector::attach(&second_bus);

    store.saved.add(&job(1), "u1").unwrap();
    second_saved.add(&job(2), "u1").unwrap();

    assert_eq!(
        first_events.events(),
        vec![DomainEvent::SavedUpdated {
            user_id: "u1".into(),
            action: SavedAction::Added,
            job_id: 1,
        }]
    );
    assert_eq!(
        second_events.events(),
        vec![DomainEvent::SavedUpdated {
            user_id: "u1".into(),
            action: SavedAction::Added,
            job_id: 2,
        }]
    );
}

#[test]
fn test_idempotent_save_fires_a_single_event() {
    let store = TestStore::new();
    let events = EventCollector::attach(&store.bus);

    store.saved.add(&job(1), "u1").unwrap();
    store.saved.add(&job(1), "u1").unwrap();

    assert_eq!(store.saved.count_for_user("u1"), 1);
    assert_eq!(events.events().len(), 1);
}

#[test]
fn test_unsubscribed_collector_misses_later_events() {
    let store = TestStore::new();

    let events = EventCollector::attach(&store.bus);
    store.saved.add(&job(1), "u1").unwrap();
    let seen_before_drop = events.events();
    drop(events);

    store.saved.add(&job(2), "u1").unwrap();
    assert_eq!(seen_before_drop.len(), 1);
    assert_eq!(store.bus.subscriber_count(), 0);
}
