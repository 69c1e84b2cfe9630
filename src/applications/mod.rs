//! Job applications and their repository.

mod models;
mod repository;

pub use models::{ApplicationDraft, ApplicationRecord, ApplicationStatus, AppliedJobMarker};
pub use repository::ApplicationsRepository;
