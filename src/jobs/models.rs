//! Job data models.
//!
//! Field names and casing match the persisted JSON layout of the web client
//! (`isOpen`, `logo_url`, ...); changing them breaks store compatibility.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Company details embedded in a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo_url: String,
}

pub const DEFAULT_COMPANY_LOGO: &str = "/companies/default.png";
pub const DEFAULT_COMPANY_NAME: &str = "Your Company";

fn default_is_open() -> bool {
    true
}

/// A job created locally by a recruiter.
///
/// `saved` and `applications` hold embedded snapshots written by the web
/// client; this layer carries them through untouched. The web client's
/// embedded snapshots may be simplified down to
/// `{id, title, description, location, company}`, so everything beyond those
/// fields must tolerate being absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalJob {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub recruiter_id: String,
    #[serde(rename = "isOpen", default = "default_is_open")]
    pub is_open: bool,
    #[serde(default)]
    pub company: Company,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub saved: Vec<JsonValue>,
    #[serde(default)]
    pub applications: Vec<JsonValue>,
}

impl LocalJob {
    /// Fill in the fields the post-job form may leave out, so every stored
    /// job renders the same way regardless of which path created it.
    pub fn normalized(mut self) -> Self {
        if self.company_name.is_none() && !self.company.name.is_empty() {
            self.company_name = Some(self.company.name.clone());
        }
        if self.company.name.is_empty() {
            self.company.name = self
                .company_name
                .clone()
                .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string());
        }
        if self.company.logo_url.is_empty() {
            self.company.logo_url = DEFAULT_COMPANY_LOGO.to_string();
        }
        self
    }
}

/// Input for posting a new job.
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub requirements: String,
    pub recruiter_id: String,
    pub company_name: Option<String>,
}

impl JobDraft {
    /// Materialize a full job record, generating id and timestamps.
    pub(crate) fn into_job(self) -> LocalJob {
        let company_name = self.company_name.clone();
        LocalJob {
            id: Utc::now().timestamp_millis(),
            title: self.title,
            description: self.description,
            location: self.location,
            requirements: self.requirements,
            recruiter_id: self.recruiter_id,
            is_open: true,
            company: Company {
                name: company_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string()),
                logo_url: DEFAULT_COMPANY_LOGO.to_string(),
            },
            company_name,
            pin_code: None,
            phone_number: None,
            created_at: Utc::now().to_rfc3339(),
            saved: Vec::new(),
            applications: Vec::new(),
        }
    }
}

/// Field patch applied by the edit-job flow. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub requirements: Option<String>,
}

impl JobUpdate {
    pub(crate) fn apply_to(&self, job: &mut LocalJob) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(description) = &self.description {
            job.description = description.clone();
        }
        if let Some(location) = &self.location {
            job.location = location.clone();
        }
        if let Some(requirements) = &self.requirements {
            job.requirements = requirements.clone();
        }
    }
}
