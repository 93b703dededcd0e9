use super::JobBoardClient;
use crate::envelope::ListEnvelope;
use crate::error::ApiError;

use models::{ProfileUpdate, SkillAssignment, SkillId, UserProfile};

use log::info;
use serde_json::json;

const PROFILE_ENDPOINT: &str = "profile/me";
const MY_SKILLS_ENDPOINT: &str = "profile/skills/";

impl JobBoardClient {
    pub async fn my_profile(&self) -> Result<UserProfile, ApiError> {
        let url = self.endpoint(PROFILE_ENDPOINT)?;
        self.get_item(url).await
    }

    pub async fn update_my_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        let url = self.endpoint(PROFILE_ENDPOINT)?;
        self.send(self.client.put(url).json(update)).await?;
        info!("Profile updated");
        Ok(())
    }

    pub async fn my_skills(&self) -> Result<Vec<SkillAssignment>, ApiError> {
        let url = self.endpoint(MY_SKILLS_ENDPOINT)?;
        self.get_list(url, ListEnvelope::Bare).await
    }

    /// Add a skill or overwrite its level and years. The same endpoint
    /// serves insert and update.
    pub async fn upsert_my_skill(&self, skill: &SkillAssignment) -> Result<(), ApiError> {
        SkillAssignment::check_level(skill.level)?;
        SkillAssignment::check_years(skill.years_experience)?;

        let url = self.endpoint(&format!("{MY_SKILLS_ENDPOINT}{}", skill.skill_id))?;
        let body = json!({
            "level": skill.level,
            "years_exp": skill.years_experience,
        });
        self.send(self.client.post(url).json(&body)).await?;
        info!(
            "Skill {} saved (level {}, {} years)",
            skill.skill_id, skill.level, skill.years_experience
        );
        Ok(())
    }

    pub async fn remove_my_skill(&self, skill_id: SkillId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("{MY_SKILLS_ENDPOINT}{skill_id}"))?;
        self.send(self.client.delete(url)).await?;
        info!("Skill {skill_id} removed");
        Ok(())
    }
}
