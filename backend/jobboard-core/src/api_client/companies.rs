use super::JobBoardClient;
use crate::envelope::ListEnvelope;
use crate::error::ApiError;

use models::{Company, CompanyDraft, CompanyId};

use log::info;

const COMPANY_ENDPOINT: &str = "company/";

impl JobBoardClient {
    pub async fn list_companies(&self) -> Result<Vec<Company>, ApiError> {
        let url = self.endpoint(COMPANY_ENDPOINT)?;
        self.get_list(url, ListEnvelope::Bare).await
    }

    pub async fn get_company(&self, company_id: CompanyId) -> Result<Company, ApiError> {
        let url = self.endpoint(&format!("{COMPANY_ENDPOINT}{company_id}"))?;
        self.get_item(url).await
    }

    /// The company owned by the signed-in employer.
    pub async fn my_company(&self) -> Result<Company, ApiError> {
        let url = self.endpoint(&format!("{COMPANY_ENDPOINT}mine"))?;
        self.get_item(url).await
    }

    pub async fn create_company(&self, draft: &CompanyDraft) -> Result<(), ApiError> {
        draft.validate()?;
        let url = self.endpoint(&format!("{COMPANY_ENDPOINT}add"))?;
        self.send(self.client.post(url).json(draft)).await?;
        info!("Created company '{}'", draft.name);
        Ok(())
    }

    /// Update the signed-in employer's company; the server resolves which one.
    pub async fn update_my_company(&self, draft: &CompanyDraft) -> Result<(), ApiError> {
        draft.validate()?;
        let url = self.endpoint(&format!("{COMPANY_ENDPOINT}update"))?;
        self.send(self.client.put(url).json(draft)).await?;
        info!("Updated company '{}'", draft.name);
        Ok(())
    }
}
