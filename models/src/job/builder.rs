use crate::error::model_error::ModelError;
use crate::job::{JobDraft, JobStatus};

/// Builder for creating validated [`JobDraft`] instances.
///
/// Mirrors the employer "post job" form: title, company, location and
/// description are mandatory; everything else is optional.
#[derive(Debug, Default)]
pub struct JobDraftBuilder {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    description: Option<String>,
    employment_type: Option<String>,
    salary_min: Option<u64>,
    salary_max: Option<u64>,
    expires_at: Option<String>,
    status: Option<JobStatus>,
}

impl JobDraftBuilder {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_employment_type(mut self, kind: impl Into<String>) -> Self {
        self.employment_type = Some(kind.into());
        self
    }

    pub fn with_salary_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.salary_min = min;
        self.salary_max = max;
        self
    }

    pub fn with_expires_at(mut self, expires_at: impl Into<String>) -> Self {
        self.expires_at = Some(expires_at.into());
        self
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Build the draft with validation.
    #[track_caller]
    pub fn build(self) -> Result<JobDraft, ModelError> {
        let title = required(self.title, "Title")?;
        let company = required(self.company, "Company")?;
        let location = required(self.location, "Location")?;
        let description = required(self.description, "Description")?;

        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Err(ModelError::validation(format!(
                    "Salary minimum {min} exceeds maximum {max}"
                )));
            }
        }

        Ok(JobDraft {
            title,
            company,
            location,
            description,
            employment_type: self.employment_type.filter(|k| !k.trim().is_empty()),
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            expires_at: self.expires_at,
            status: self.status.map(|s| s.as_str().to_string()),
        })
    }
}

#[track_caller]
fn required(value: Option<String>, field: &str) -> Result<String, ModelError> {
    let value = value.ok_or_else(|| ModelError::validation(format!("{field} is required")))?;

    if value.trim().is_empty() {
        return Err(ModelError::validation(format!("{field} cannot be empty")));
    }

    Ok(value)
}
