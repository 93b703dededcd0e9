use super::load_into;
use crate::api_client::JobBoardClient;
use crate::apply_flow::AppliedJobs;
use crate::error::ApiError;
use crate::filter::{FilterSet, compose_cloned};
use crate::optimistic::ViewState;

use models::Application;

use std::sync::Arc;

/// The seeker's submitted applications.
pub struct MyApplications {
    client: JobBoardClient,
    applications: Arc<ViewState<Application>>,
    applied: AppliedJobs,
    filter: FilterSet,
}

impl MyApplications {
    pub fn new(client: JobBoardClient, applied: AppliedJobs) -> Self {
        Self {
            client,
            applications: ViewState::empty(),
            applied,
            filter: FilterSet::default(),
        }
    }

    pub fn applications(&self) -> &Arc<ViewState<Application>> {
        &self.applications
    }

    /// Load, and remember every job already applied to.
    pub async fn load(&self) -> Result<usize, ApiError> {
        let count = load_into(
            &*self.applications,
            "applications",
            self.client.my_applications(),
        )
        .await?;

        for application in self.applications.snapshot() {
            self.applied.insert(application.job_id);
        }
        Ok(count)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn visible(&self) -> Vec<Application> {
        compose_cloned(&self.applications.snapshot(), &self.filter)
    }

    pub fn unmount(&self) {
        self.applications.unmount();
    }
}
