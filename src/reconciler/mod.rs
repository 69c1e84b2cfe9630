//! Consistency reconciliation for the local store.
//!
//! The event bus only reaches subscribers in the same process, and a view
//! can mount after the event it needed has already fired. Two mechanisms
//! close those gaps: periodic re-reads of the repositories ([`poller`]) and
//! a one-shot scratch-record handoff for the single most recent write
//! ([`Handoff`]). State is eventually consistent within one polling
//! interval, or immediately consistent via the handoff.

mod handoff;
mod poller;

pub use handoff::Handoff;
pub use poller::{spawn_poller, spawn_watch, PollerHandle};
