use super::load_into;
use crate::api_client::JobBoardClient;
use crate::error::ApiError;
use crate::filter::{FilterSet, compose_cloned};
use crate::optimistic::ViewState;

use models::{Company, CompanyId};

use std::sync::Arc;

/// Browsable company list with name/location search.
pub struct CompanyDirectory {
    client: JobBoardClient,
    companies: Arc<ViewState<Company>>,
    filter: FilterSet,
}

impl CompanyDirectory {
    pub fn new(client: JobBoardClient) -> Self {
        Self {
            client,
            companies: ViewState::empty(),
            filter: FilterSet::default(),
        }
    }

    pub fn companies(&self) -> &Arc<ViewState<Company>> {
        &self.companies
    }

    pub async fn load(&self) -> Result<usize, ApiError> {
        load_into(&*self.companies, "companies", self.client.list_companies()).await
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.filter.location = location.into();
    }

    pub fn visible(&self) -> Vec<Company> {
        compose_cloned(&self.companies.snapshot(), &self.filter)
    }

    /// Full company record, including its open jobs.
    pub async fn detail(&self, company_id: CompanyId) -> Result<Company, ApiError> {
        self.client.get_company(company_id).await
    }

    pub fn unmount(&self) {
        self.companies.unmount();
    }
}
