//! Common test infrastructure
//!
//! Builds a full local store on a temporary sqlite file with all three
//! repositories wired to one event bus. Tests should only import from this
//! module, not from internal submodules.

mod fixtures;

pub use fixtures::{application, job, EventCollector, TestStore};
