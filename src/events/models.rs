//! Domain event models.

use crate::jobs::LocalJob;
use serde::{Deserialize, Serialize};

/// What happened to a saved-job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavedAction {
    Added,
    Removed,
}

/// What happened to an application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationAction {
    Added,
    AlreadyExists,
    StatusUpdated,
}

/// All change events published on the [`EventBus`](super::EventBus).
///
/// Serialized using serde's adjacently tagged representation:
/// `{"type": "event_name", "payload": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum DomainEvent {
    #[serde(rename = "job-added")]
    JobAdded { job: LocalJob },

    #[serde(rename = "job-removed")]
    JobRemoved { job_id: i64 },

    #[serde(rename = "job-updated")]
    JobUpdated { job_id: i64 },

    #[serde(rename = "saved-updated")]
    SavedUpdated {
        user_id: String,
        action: SavedAction,
        job_id: i64,
    },

    #[serde(rename = "application-updated")]
    ApplicationUpdated {
        /// Absent for per-job status updates, which are not tied to one user.
        user_id: Option<String>,
        action: ApplicationAction,
        job_id: i64,
    },

    #[serde(rename = "applications-cleared")]
    ApplicationsCleared,
}
