//! Locally created jobs and their repository.

mod models;
mod repository;

pub use models::{Company, JobDraft, JobUpdate, LocalJob};
pub use repository::JobsRepository;
