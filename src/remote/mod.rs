//! Best-effort remote mirror boundary.
//!
//! The backend API is not the source of truth for rendering; the local store
//! is. Repositories mirror their writes through this trait after the local
//! write has already succeeded, and a remote failure is logged and swallowed,
//! never propagated.

use crate::applications::{ApplicationRecord, ApplicationStatus};
use crate::jobs::LocalJob;
use anyhow::Result;
use tracing::warn;

/// The remote CRUD operations consumed by the repositories.
pub trait RemoteApi: Send + Sync {
    fn add_new_job(&self, job: &LocalJob) -> Result<()>;
    fn update_job(&self, job: &LocalJob) -> Result<()>;
    fn delete_job(&self, job_id: i64) -> Result<()>;
    fn update_hiring_status(&self, job_id: i64, is_open: bool) -> Result<()>;
    fn save_job(&self, job_id: i64, user_id: &str) -> Result<()>;
    fn remove_saved_job(&self, job_id: i64, user_id: &str) -> Result<()>;
    fn apply_to_job(&self, application: &ApplicationRecord) -> Result<()>;
    fn update_application_status(&self, job_id: i64, status: ApplicationStatus) -> Result<()>;
}

/// Mirror that goes nowhere. Used when running fully offline and in tests.
pub struct NoopRemoteApi;

impl RemoteApi for NoopRemoteApi {
    fn add_new_job(&self, _job: &LocalJob) -> Result<()> {
        Ok(())
    }
    fn update_job(&self, _job: &LocalJob) -> Result<()> {
        Ok(())
    }
    fn delete_job(&self, _job_id: i64) -> Result<()> {
        Ok(())
    }
    fn update_hiring_status(&self, _job_id: i64, _is_open: bool) -> Result<()> {
        Ok(())
    }
    fn save_job(&self, _job_id: i64, _user_id: &str) -> Result<()> {
        Ok(())
    }
    fn remove_saved_job(&self, _job_id: i64, _user_id: &str) -> Result<()> {
        Ok(())
    }
    fn apply_to_job(&self, _application: &ApplicationRecord) -> Result<()> {
        Ok(())
    }
    fn update_application_status(&self, _job_id: i64, _status: ApplicationStatus) -> Result<()> {
        Ok(())
    }
}

/// Log-and-swallow wrapper for fire-and-forget mirror calls.
pub(crate) fn mirror(operation: &str, result: Result<()>) {
    if let Err(err) = result {
        warn!("Remote mirror {} failed (local state kept): {:#}", operation, err);
    }
}
