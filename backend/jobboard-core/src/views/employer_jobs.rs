use super::load_into;
use crate::api_client::{JobBoardClient, JobQuery};
use crate::error::ApiError;
use crate::filter::{FilterSet, StatusTab, compose_cloned};
use crate::optimistic::{MutationOutcome, ViewState, mutate};

use models::{JobId, JobPosting};

use std::sync::Arc;

/// The employer's own postings with status tabs, delete and publish toggle.
pub struct EmployerJobBoard {
    client: JobBoardClient,
    jobs: Arc<ViewState<JobPosting>>,
    filter: FilterSet,
}

impl EmployerJobBoard {
    pub fn new(client: JobBoardClient) -> Self {
        Self {
            client,
            jobs: ViewState::empty(),
            filter: FilterSet::default(),
        }
    }

    pub fn jobs(&self) -> &Arc<ViewState<JobPosting>> {
        &self.jobs
    }

    pub async fn load(&self) -> Result<usize, ApiError> {
        load_into(&*self.jobs, "company jobs", self.client.list_jobs(&JobQuery::MyCompany)).await
    }

    pub fn filter(&self) -> &FilterSet {
        &self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_tab(&mut self, tab: StatusTab) {
        self.filter.tab = tab;
    }

    /// Jobs shown under the current tab and search.
    pub fn visible(&self) -> Vec<JobPosting> {
        compose_cloned(&self.jobs.snapshot(), &self.filter)
    }

    /// Remove the job now; put it back if the server refuses.
    pub async fn delete(&self, job_id: JobId) -> Result<MutationOutcome<JobPosting>, ApiError> {
        mutate(&*self.jobs, job_id, |_| None, async {
            self.client.delete_job(job_id).await.map(|()| None)
        })
        .await
    }

    /// Flip between open and closed; any other status publishes.
    pub async fn toggle_publish(
        &self,
        job_id: JobId,
    ) -> Result<MutationOutcome<JobPosting>, ApiError> {
        let current = self
            .jobs
            .get(&job_id)
            .ok_or_else(|| ApiError::validation(format!("Job {job_id} is not on this board")))?;
        let publish = !current.is_published();

        mutate(
            &*self.jobs,
            job_id,
            |job| job.map(JobPosting::with_publish_toggled),
            async {
                self.client
                    .set_job_published(job_id, publish)
                    .await
                    .map(|()| None)
            },
        )
        .await
    }

    pub fn unmount(&self) {
        self.jobs.unmount();
    }
}
