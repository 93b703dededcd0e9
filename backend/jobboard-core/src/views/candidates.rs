use super::load_into;
use crate::api_client::JobBoardClient;
use crate::error::ApiError;
use crate::optimistic::{MutationOutcome, ViewState, mutate};

use models::{Application, ApplicationAction, ApplicationId, JobId};

use std::sync::Arc;

/// Applications received for one job, with accept/reject.
pub struct CandidateReview {
    client: JobBoardClient,
    job_id: JobId,
    candidates: Arc<ViewState<Application>>,
}

impl CandidateReview {
    pub fn new(client: JobBoardClient, job_id: JobId) -> Self {
        Self {
            client,
            job_id,
            candidates: ViewState::empty(),
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn candidates(&self) -> &Arc<ViewState<Application>> {
        &self.candidates
    }

    pub async fn load(&self) -> Result<usize, ApiError> {
        load_into(&*self.candidates, "candidates", self.client.candidates(self.job_id)).await
    }

    /// Show the resulting status right away; revert if the server refuses.
    pub async fn review(
        &self,
        application_id: ApplicationId,
        action: ApplicationAction,
    ) -> Result<MutationOutcome<Application>, ApiError> {
        if self.candidates.get(&application_id).is_none() {
            return Err(ApiError::validation(format!(
                "Application {application_id} is not listed for job {}",
                self.job_id
            )));
        }

        let status = action.target_status();
        mutate(
            &*self.candidates,
            application_id,
            |application| application.map(|a| a.with_status(status)),
            async {
                self.client
                    .review_application(application_id, action)
                    .await
                    .map(|()| None)
            },
        )
        .await
    }

    pub fn unmount(&self) {
        self.candidates.unmount();
    }
}
