use crate::jobs::LocalJob;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One saved job for one user.
///
/// At most one record exists per (`job_id`, `user_id`) pair. The embedded
/// `job` is a snapshot taken at save time; later edits to the source job do
/// not flow into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJobRecord {
    pub id: i64,
    pub job_id: i64,
    pub user_id: String,
    #[serde(default)]
    pub created_at: String,
    pub job: LocalJob,
}

impl SavedJobRecord {
    pub fn new(job: &LocalJob, user_id: &str) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            job_id: job.id,
            user_id: user_id.to_string(),
            created_at: Utc::now().to_rfc3339(),
            job: job.clone(),
        }
    }
}
