use crate::applications::ApplicationRecord;
use crate::storage::{keys, CollectionStore};
use chrono::Utc;
use tracing::{debug, warn};

/// One-shot scratch-record handoff between a write and the next page load.
///
/// Right after applying, the writer stores the new record under
/// `mostRecentApplication` and raises the `forceRefreshApplications`
/// sentinel. The destination view consumes the sentinel on mount and merges
/// the record into its list if the regular collection read missed it. The
/// same pattern covers the just-edited-job highlight via
/// `lastUpdatedJobId`/`jobUpdatedTimestamp`.
pub struct Handoff {
    store: CollectionStore,
}

impl Handoff {
    pub fn new(store: CollectionStore) -> Self {
        Self { store }
    }

    /// Store the most recent application and raise the refresh sentinel.
    pub fn record_recent_application(&self, record: &ApplicationRecord) {
        if let Err(err) = self.store.set_scratch(keys::MOST_RECENT_APPLICATION, record) {
            warn!("Failed to record most recent application: {:#}", err);
            return;
        }
        if let Err(err) = self.store.set_raw(keys::FORCE_REFRESH_APPLICATIONS, "true") {
            warn!("Failed to raise force-refresh sentinel: {:#}", err);
        }
    }

    /// The most recent application, if one has been recorded.
    pub fn recent_application(&self) -> Option<ApplicationRecord> {
        match self.store.get_scratch(keys::MOST_RECENT_APPLICATION) {
            Ok(record) => record,
            Err(err) => {
                warn!("Failed to read most recent application: {:#}", err);
                None
            }
        }
    }

    /// Observe and clear the force-refresh sentinel. Returns whether it was
    /// set; a second call returns `false` until the next write.
    pub fn consume_force_refresh(&self) -> bool {
        match self.store.get_raw(keys::FORCE_REFRESH_APPLICATIONS) {
            Ok(Some(value)) if value == "true" => {
                if let Err(err) = self.store.remove(keys::FORCE_REFRESH_APPLICATIONS) {
                    warn!("Failed to clear force-refresh sentinel: {:#}", err);
                }
                true
            }
            Ok(_) => false,
            Err(err) => {
                warn!("Failed to read force-refresh sentinel: {:#}", err);
                false
            }
        }
    }

    /// Merge the most recent application into `list` if it is not already
    /// there (by record id). Returns whether anything was added.
    pub fn merge_recent_application(&self, list: &mut Vec<ApplicationRecord>) -> bool {
        let Some(recent) = self.recent_application() else {
            return false;
        };
        if list.iter().any(|record| record.id == recent.id) {
            return false;
        }
        debug!("Merging most recent application {} into view", recent.id);
        list.push(recent);
        true
    }

    /// Drop the most recent application scratch record.
    pub fn clear_recent_application(&self) {
        if let Err(err) = self.store.remove(keys::MOST_RECENT_APPLICATION) {
            warn!("Failed to clear most recent application: {:#}", err);
        }
    }

    /// Remember which job was just edited, for post-navigation highlighting.
    pub fn mark_job_updated(&self, job_id: i64) {
        let now = Utc::now().timestamp_millis();
        let result = self
            .store
            .set_raw(keys::LAST_UPDATED_JOB_ID, &job_id.to_string())
            .and_then(|_| {
                self.store
                    .set_raw(keys::JOB_UPDATED_TIMESTAMP, &now.to_string())
            });
        if let Err(err) = result {
            warn!("Failed to record job-updated scratch pair: {:#}", err);
        }
    }

    /// Observe and clear the just-edited-job scratch pair. Returns
    /// `(job_id, timestamp_millis)` when one was recorded. An unreadable
    /// pair is dropped, like any other garbage scratch value.
    pub fn take_job_updated(&self) -> Option<(i64, i64)> {
        let raw_id = self.store.get_raw(keys::LAST_UPDATED_JOB_ID).ok().flatten()?;
        let raw_timestamp = self.store.get_raw(keys::JOB_UPDATED_TIMESTAMP).ok().flatten();

        if let Err(err) = self
            .store
            .remove(keys::LAST_UPDATED_JOB_ID)
            .and_then(|_| self.store.remove(keys::JOB_UPDATED_TIMESTAMP))
        {
            warn!("Failed to clear job-updated scratch pair: {:#}", err);
        }

        let job_id = match raw_id.parse() {
            Ok(job_id) => job_id,
            Err(_) => {
                warn!("Dropping unreadable job-updated scratch value {:?}", raw_id);
                return None;
            }
        };
        let timestamp = raw_timestamp
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);

        Some((job_id, timestamp))
    }
}
