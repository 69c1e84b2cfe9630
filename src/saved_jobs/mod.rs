//! Saved-job records and their repository.

mod models;
mod repository;

pub use models::SavedJobRecord;
pub use repository::SavedJobsRepository;
