use crate::job::JobId;
use crate::session::UserId;

use std::fmt;

use serde::{Deserialize, Serialize};

pub type ApplicationId = u64;

/// Review status of an application. The server owns transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Submitted,
    Interview,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Other(raw) => raw,
        }
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Submitted
    }
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        match raw.to_lowercase().as_str() {
            "submitted" | "pending" | "applied" => ApplicationStatus::Submitted,
            "interview" => ApplicationStatus::Interview,
            "rejected" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Other(raw),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employer decision on an application, sent as a path token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationAction {
    Accept,
    Reject,
}

impl ApplicationAction {
    pub fn token(&self) -> &'static str {
        match self {
            ApplicationAction::Accept => "accept",
            ApplicationAction::Reject => "reject",
        }
    }

    /// Status the server assigns for this action.
    pub fn target_status(&self) -> ApplicationStatus {
        match self {
            ApplicationAction::Accept => ApplicationStatus::Interview,
            ApplicationAction::Reject => ApplicationStatus::Rejected,
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "accept" => Some(ApplicationAction::Accept),
            "reject" => Some(ApplicationAction::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(alias = "application_id")]
    pub id: ApplicationId,
    #[serde(default)]
    pub job_id: JobId,
    #[serde(default, alias = "user_id")]
    pub applicant_id: UserId,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, alias = "cv_path", skip_serializing_if = "Option::is_none")]
    pub cv_ref: Option<String>,
    #[serde(default, alias = "title", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(
        default,
        alias = "full_name",
        alias = "applicant",
        skip_serializing_if = "Option::is_none"
    )]
    pub applicant_name: Option<String>,
}

impl Application {
    pub fn with_status(&self, status: ApplicationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
