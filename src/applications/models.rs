//! Application data models.

use crate::jobs::LocalJob;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_EDUCATION: &str = "Graduate";
pub const DEFAULT_APPLICANT_NAME: &str = "User";
pub const DEFAULT_RESUME_URL: &str = "https://example.com/resume.pdf";
pub const DEFAULT_RESUME_FILE_NAME: &str = "resume.pdf";

/// Hiring pipeline status. Shared by every application on a job; status
/// transitions are applied per job, not per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Interviewing,
    Hired,
    Rejected,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(ApplicationStatus::Applied),
            "interviewing" => Ok(ApplicationStatus::Interviewing),
            "hired" => Ok(ApplicationStatus::Hired),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("unknown application status: {}", other)),
        }
    }
}

/// One submitted application.
///
/// Unique per (`job_id`, `candidate_id`): a user applies to a job at most
/// once. `job` is a snapshot for rendering, not a live reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: i64,
    pub job_id: i64,
    pub candidate_id: String,
    pub name: String,
    pub experience: i64,
    pub education: String,
    pub skills: String,
    pub resume: String,
    #[serde(rename = "resumeFileName")]
    pub resume_file_name: String,
    pub status: ApplicationStatus,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<LocalJob>,
}

/// Input for submitting an application. Optional fields fall back to the
/// same defaults the apply form uses.
#[derive(Debug, Clone, Default)]
pub struct ApplicationDraft {
    pub job_id: i64,
    pub candidate_id: String,
    pub name: Option<String>,
    pub experience: Option<i64>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub resume: Option<String>,
    pub resume_file_name: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub job: Option<LocalJob>,
}

impl ApplicationDraft {
    pub(crate) fn into_record(self) -> ApplicationRecord {
        ApplicationRecord {
            id: Utc::now().timestamp_millis(),
            job_id: self.job_id,
            candidate_id: self.candidate_id,
            name: self
                .name
                .unwrap_or_else(|| DEFAULT_APPLICANT_NAME.to_string()),
            experience: self.experience.unwrap_or(0),
            education: self
                .education
                .unwrap_or_else(|| DEFAULT_EDUCATION.to_string()),
            skills: self.skills.unwrap_or_default(),
            resume: self.resume.unwrap_or_else(|| DEFAULT_RESUME_URL.to_string()),
            resume_file_name: self
                .resume_file_name
                .unwrap_or_else(|| DEFAULT_RESUME_FILE_NAME.to_string()),
            status: self.status.unwrap_or(ApplicationStatus::Applied),
            created_at: Utc::now().to_rfc3339(),
            job: self.job,
        }
    }
}

/// Durable existence marker kept in `permanentAppliedJobs`, independent of
/// the main collection. Field casing matches the stored layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedJobMarker {
    #[serde(rename = "jobId")]
    pub job_id: i64,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub timestamp: i64,
}
