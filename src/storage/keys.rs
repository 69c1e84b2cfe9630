//! Well-known storage keys.
//!
//! These must match the browser client's local storage layout exactly, so a
//! store exported from one side can be imported by the other.

/// Jobs created locally by recruiters.
pub const CREATED_JOBS: &str = "mockCreatedJobs";

/// Saved-job records, one per (job, user) pair.
pub const SAVED_JOBS: &str = "mockSavedJobs";

/// Submitted applications.
pub const APPLICATIONS: &str = "mockApplications";

/// Durable `{jobId, userId, timestamp}` markers, kept independently of the
/// main applications collection.
pub const PERMANENT_APPLIED_JOBS: &str = "permanentAppliedJobs";

/// Single most recent application, written right before a navigation.
pub const MOST_RECENT_APPLICATION: &str = "mostRecentApplication";

/// `"true"` sentinel telling the destination view to merge the most recent
/// application; deleted once observed.
pub const FORCE_REFRESH_APPLICATIONS: &str = "forceRefreshApplications";

/// Id of the job that was just edited, for post-navigation highlighting.
pub const LAST_UPDATED_JOB_ID: &str = "lastUpdatedJobId";

/// Millisecond timestamp paired with [`LAST_UPDATED_JOB_ID`].
pub const JOB_UPDATED_TIMESTAMP: &str = "jobUpdatedTimestamp";
