//! Domain change notifications.
//!
//! Repositories publish an event after every successful local write so that
//! independently mounted views can re-read the store without sharing any
//! in-memory state. Delivery is synchronous and in-process only; cross-process
//! drift is healed by the reconciler, not by this bus.

mod bus;
mod models;

pub use bus::{EventBus, Subscription};
pub use models::{ApplicationAction, DomainEvent, SavedAction};
