pub mod builder;

use crate::skill::SkillAssignment;

use std::fmt;

use serde::{Deserialize, Serialize};

pub type JobId = u64;

const STATUS_OPEN: &str = "open";
const STATUS_CLOSED: &str = "closed";
const STATUS_DRAFT: &str = "draft";

/// Publication status of a job posting.
///
/// The backend has shipped three shapes over time (`status`, `state`, and a
/// boolean `is_open`), so the canonical value is always derived through
/// [`JobStatus::infer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Open,
    Closed,
    Draft,
    Other(String),
}

impl JobStatus {
    /// Parse a raw status string, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            STATUS_OPEN => JobStatus::Open,
            STATUS_CLOSED => JobStatus::Closed,
            STATUS_DRAFT => JobStatus::Draft,
            other => JobStatus::Other(other.to_string()),
        }
    }

    /// Derive the effective status.
    ///
    /// Precedence: non-empty `status`, then non-empty `state`, then
    /// `closed` when `is_open` is explicitly `false`, otherwise `open`.
    pub fn infer(status: Option<&str>, state: Option<&str>, is_open: Option<bool>) -> Self {
        if let Some(raw) = status.filter(|s| !s.is_empty()) {
            return Self::parse(raw);
        }
        if let Some(raw) = state.filter(|s| !s.is_empty()) {
            return Self::parse(raw);
        }
        if is_open == Some(false) {
            JobStatus::Closed
        } else {
            JobStatus::Open
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Open => STATUS_OPEN,
            JobStatus::Closed => STATUS_CLOSED,
            JobStatus::Draft => STATUS_DRAFT,
            JobStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Company reference embedded in a job.
///
/// List endpoints return the bare company id; detail endpoints and some
/// older payloads embed an object or just the company name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanyRef {
    Id(u64),
    Name(String),
    Embedded {
        #[serde(default, alias = "company_id")]
        id: Option<u64>,
        name: String,
    },
}

impl CompanyRef {
    pub fn display_name(&self) -> String {
        match self {
            CompanyRef::Id(id) => id.to_string(),
            CompanyRef::Name(name) => name.clone(),
            CompanyRef::Embedded { name, .. } => name.clone(),
        }
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            CompanyRef::Id(id) => Some(*id),
            CompanyRef::Name(_) => None,
            CompanyRef::Embedded { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(alias = "job_id")]
    pub id: JobId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(default, alias = "company_ref", skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<SkillAssignment>,
}

impl JobPosting {
    /// Minimal posting, mostly useful for tests and optimistic inserts.
    pub fn new(id: JobId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            location: String::new(),
            employment_type: None,
            salary_min: None,
            salary_max: None,
            posted_at: None,
            expires_at: None,
            status: None,
            state: None,
            is_open: None,
            company: None,
            skills: Vec::new(),
        }
    }

    pub fn effective_status(&self) -> JobStatus {
        JobStatus::infer(self.status.as_deref(), self.state.as_deref(), self.is_open)
    }

    pub fn company_name(&self) -> String {
        self.company
            .as_ref()
            .map(CompanyRef::display_name)
            .unwrap_or_default()
    }

    pub fn is_published(&self) -> bool {
        self.effective_status() == JobStatus::Open
    }

    /// Copy with the publish flag flipped: open jobs close, anything else opens.
    pub fn with_publish_toggled(&self) -> Self {
        let open = self.is_published();
        let next = if open { JobStatus::Closed } else { JobStatus::Open };

        Self {
            status: Some(next.as_str().to_string()),
            is_open: Some(!open),
            ..self.clone()
        }
    }
}

/// Payload for creating or updating a job.
///
/// Construct through [`builder::JobDraftBuilder`] so required fields are checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl JobDraft {
    /// Flattened `(name, value)` pairs for form-encoded submission.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("company", self.company.clone()),
            ("location", self.location.clone()),
            ("description", self.description.clone()),
        ];
        if let Some(kind) = &self.employment_type {
            fields.push(("type", kind.clone()));
        }
        if let Some(min) = self.salary_min {
            fields.push(("salary_min", min.to_string()));
        }
        if let Some(max) = self.salary_max {
            fields.push(("salary_max", max.to_string()));
        }
        if let Some(expires) = &self.expires_at {
            fields.push(("expires_at", expires.clone()));
        }
        if let Some(status) = &self.status {
            fields.push(("status", status.clone()));
        }
        fields
    }
}
