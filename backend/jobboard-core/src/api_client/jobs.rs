use super::JobBoardClient;
use crate::envelope::ListEnvelope;
use crate::error::ApiError;

use models::{JobDraft, JobId, JobPosting, SkillId};

use log::{debug, info};
use reqwest::multipart::Form;
use url::Url;

const JOB_ENDPOINT: &str = "job/";
const JOBS_KEY: &str = "jobs";
const JOBS_ENVELOPE: ListEnvelope = ListEnvelope::Keyed(JOBS_KEY);

/// Which slice of the job catalog to load. Every variant answers with
/// `{"jobs": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobQuery {
    #[default]
    All,
    /// `job/by-location/{location}`
    Location(String),
    /// Jobs requiring every listed skill. An empty list is the same as `All`.
    Skills(Vec<SkillId>),
    SalaryRange { min: Option<u64>, max: Option<u64> },
    /// Jobs of the signed-in employer's company.
    MyCompany,
}

impl JobBoardClient {
    fn job_url(&self, path: &str) -> Result<Url, ApiError> {
        self.endpoint(&format!("{JOB_ENDPOINT}{path}"))
    }

    fn job_query_url(&self, query: &JobQuery) -> Result<Url, ApiError> {
        match query {
            JobQuery::All => self.job_url(""),
            JobQuery::Skills(ids) if ids.is_empty() => self.job_url(""),
            JobQuery::Location(location) => {
                let mut url = self.job_url("by-location/")?;
                url.path_segments_mut()
                    .map_err(|_| ApiError::validation("Base URL cannot carry a path"))?
                    .pop_if_empty()
                    .push(location.trim());
                Ok(url)
            }
            JobQuery::Skills(ids) => {
                let mut url = self.job_url("by-skill")?;
                {
                    let mut pairs = url.query_pairs_mut();
                    for id in ids {
                        pairs.append_pair("skill_ids", &id.to_string());
                    }
                }
                Ok(url)
            }
            JobQuery::SalaryRange { min, max } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(ApiError::validation(format!(
                            "Minimum salary {min} is above maximum {max}"
                        )));
                    }
                }
                let mut url = self.job_url("")?;
                {
                    let mut pairs = url.query_pairs_mut();
                    if let Some(min) = min {
                        pairs.append_pair("min_salary", &min.to_string());
                    }
                    if let Some(max) = max {
                        pairs.append_pair("max_salary", &max.to_string());
                    }
                }
                Ok(url)
            }
            JobQuery::MyCompany => self.job_url("by-company/"),
        }
    }

    pub async fn list_jobs(&self, query: &JobQuery) -> Result<Vec<JobPosting>, ApiError> {
        let url = self.job_query_url(query)?;
        let jobs: Vec<JobPosting> = self.get_list(url, JOBS_ENVELOPE).await?;
        debug!("Loaded {} jobs for {:?}", jobs.len(), query);
        Ok(jobs)
    }

    pub async fn get_job(&self, job_id: JobId) -> Result<JobPosting, ApiError> {
        let url = self.job_url(&job_id.to_string())?;
        self.get_item(url).await
    }

    /// `POST job/add` as a form; the backend reads it with `request.form()`.
    pub async fn create_job(&self, draft: &JobDraft) -> Result<(), ApiError> {
        let url = self.job_url("add")?;

        let form = draft
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        self.send(self.client.post(url).multipart(form)).await?;
        info!("Posted job '{}'", draft.title);
        Ok(())
    }

    pub async fn update_job(&self, job_id: JobId, draft: &JobDraft) -> Result<(), ApiError> {
        let url = self.job_url(&format!("update/{job_id}"))?;
        self.send(self.client.put(url).json(draft)).await?;
        info!("Updated job {job_id}");
        Ok(())
    }

    pub async fn delete_job(&self, job_id: JobId) -> Result<(), ApiError> {
        let url = self.job_url(&format!("delete/{job_id}"))?;
        self.send(self.client.delete(url)).await?;
        info!("Deleted job {job_id}");
        Ok(())
    }

    /// Open (`publish == true`) or close a posting.
    pub async fn set_job_published(&self, job_id: JobId, publish: bool) -> Result<(), ApiError> {
        let action = if publish { "publish" } else { "unpublish" };
        let url = self.job_url(&format!("{job_id}/{action}"))?;
        self.send(self.client.post(url)).await?;
        info!("Job {job_id}: {action}");
        Ok(())
    }
}
