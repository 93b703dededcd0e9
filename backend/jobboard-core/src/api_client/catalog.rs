use super::JobBoardClient;
use crate::envelope::ListEnvelope;
use crate::error::ApiError;

use models::{RegionCatalogEntry, SkillCatalogEntry};

use serde::de::DeserializeOwned;

const SKILL_CATALOG_ENDPOINT: &str = "skills";
const REGION_CATALOG_ENDPOINT: &str = "location";

impl JobBoardClient {
    /// Search the skill catalog. An empty query returns the default page.
    pub async fn search_skills(&self, query: &str) -> Result<Vec<SkillCatalogEntry>, ApiError> {
        self.search_catalog(SKILL_CATALOG_ENDPOINT, query).await
    }

    /// Search the region catalog. An empty query returns the default page.
    pub async fn search_regions(&self, query: &str) -> Result<Vec<RegionCatalogEntry>, ApiError> {
        self.search_catalog(REGION_CATALOG_ENDPOINT, query).await
    }

    async fn search_catalog<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<Vec<T>, ApiError> {
        let mut url = self.endpoint(endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "object");
            // The server rejects an empty `query` parameter.
            let query = query.trim();
            if !query.is_empty() {
                pairs.append_pair("query", query);
            }
        }
        self.get_list(url, ListEnvelope::Bare).await
    }
}
