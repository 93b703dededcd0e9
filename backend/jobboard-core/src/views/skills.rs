use super::load_into;
use crate::api_client::JobBoardClient;
use crate::debounce::DebouncedSearch;
use crate::error::ApiError;
use crate::optimistic::{MutationOutcome, ViewState, mutate};

use models::{SkillAssignment, SkillCatalogEntry, SkillId};

use std::sync::Arc;
use std::time::Duration;

/// The signed-in user's skills plus a catalog search to add more.
pub struct SkillsPicker {
    client: JobBoardClient,
    mine: Arc<ViewState<SkillAssignment>>,
}

impl SkillsPicker {
    pub fn new(client: JobBoardClient) -> Self {
        Self {
            client,
            mine: ViewState::empty(),
        }
    }

    pub fn skills(&self) -> &Arc<ViewState<SkillAssignment>> {
        &self.mine
    }

    pub async fn load(&self) -> Result<usize, ApiError> {
        load_into(&*self.mine, "skills", self.client.my_skills()).await
    }

    pub fn catalog_search(&self, delay: Duration) -> DebouncedSearch<SkillCatalogEntry> {
        let client = self.client.clone();
        DebouncedSearch::new(delay, move |query: String| {
            let client = client.clone();
            async move { client.search_skills(&query).await }
        })
    }

    /// Add a catalog skill at level 1 with no experience.
    pub async fn add(
        &self,
        entry: &SkillCatalogEntry,
    ) -> Result<MutationOutcome<SkillAssignment>, ApiError> {
        if self.mine.get(&entry.skill_id).is_some() {
            return Err(ApiError::validation(format!(
                "{} is already in your skills",
                entry.name
            )));
        }

        let picked = SkillAssignment::picked(entry.skill_id, entry.name.clone());
        self.save(picked).await
    }

    pub async fn remove(&self, skill_id: SkillId) -> Result<MutationOutcome<SkillAssignment>, ApiError> {
        self.require(skill_id)?;
        mutate(&*self.mine, skill_id, |_| None, async {
            self.client.remove_my_skill(skill_id).await.map(|()| None)
        })
        .await
    }

    pub async fn set_level(
        &self,
        skill_id: SkillId,
        level: u8,
    ) -> Result<MutationOutcome<SkillAssignment>, ApiError> {
        let updated = self.require(skill_id)?.with_level(level)?;
        self.save(updated).await
    }

    pub async fn set_years(
        &self,
        skill_id: SkillId,
        years: f32,
    ) -> Result<MutationOutcome<SkillAssignment>, ApiError> {
        let updated = self.require(skill_id)?.with_years(years)?;
        self.save(updated).await
    }

    fn require(&self, skill_id: SkillId) -> Result<SkillAssignment, ApiError> {
        self.mine
            .get(&skill_id)
            .ok_or_else(|| ApiError::validation(format!("Skill {skill_id} is not in your skills")))
    }

    async fn save(
        &self,
        skill: SkillAssignment,
    ) -> Result<MutationOutcome<SkillAssignment>, ApiError> {
        let optimistic = skill.clone();
        mutate(&*self.mine, skill.skill_id, move |_| Some(optimistic), async {
            self.client.upsert_my_skill(&skill).await.map(|()| None)
        })
        .await
    }

    pub fn unmount(&self) {
        self.mine.unmount();
    }
}
