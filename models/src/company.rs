use crate::error::model_error::ModelError;
use crate::job::JobPosting;

use serde::{Deserialize, Serialize};

pub type CompanyId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(alias = "company_id")]
    pub id: CompanyId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "description", skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
}

/// Create/update payload for the employer's company profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl CompanyDraft {
    #[track_caller]
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::validation("Company name cannot be empty"));
        }
        if let Some(website) = &self.website {
            if !website.is_empty()
                && !website.starts_with("http://")
                && !website.starts_with("https://")
            {
                return Err(ModelError::validation(format!(
                    "Invalid website URL: {website}"
                )));
            }
        }
        Ok(())
    }
}
