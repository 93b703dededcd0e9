use crate::error::model_error::ModelError;

use serde::{Deserialize, Serialize};

pub type SkillId = u64;

pub const MIN_SKILL_LEVEL: u8 = 1;
pub const MAX_SKILL_LEVEL: u8 = 5;

/// A skill attached to a user profile or to a job's requirement list.
///
/// Unique by `skill_id` within the owning list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAssignment {
    #[serde(alias = "id")]
    pub skill_id: SkillId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default, rename = "years_exp", alias = "years_experience")]
    pub years_experience: f32,
}

fn default_level() -> u8 {
    MIN_SKILL_LEVEL
}

impl SkillAssignment {
    #[track_caller]
    pub fn new(
        skill_id: SkillId,
        name: impl Into<String>,
        level: u8,
        years_experience: f32,
    ) -> Result<Self, ModelError> {
        Self::check_level(level)?;
        Self::check_years(years_experience)?;

        Ok(Self {
            skill_id,
            name: name.into(),
            level,
            years_experience,
        })
    }

    /// Freshly picked skill: level 1, no experience.
    pub fn picked(skill_id: SkillId, name: impl Into<String>) -> Self {
        Self {
            skill_id,
            name: name.into(),
            level: MIN_SKILL_LEVEL,
            years_experience: 0.0,
        }
    }

    #[track_caller]
    pub fn with_level(&self, level: u8) -> Result<Self, ModelError> {
        Self::check_level(level)?;
        Ok(Self {
            level,
            ..self.clone()
        })
    }

    #[track_caller]
    pub fn with_years(&self, years_experience: f32) -> Result<Self, ModelError> {
        Self::check_years(years_experience)?;
        Ok(Self {
            years_experience,
            ..self.clone()
        })
    }

    #[track_caller]
    pub fn check_level(level: u8) -> Result<(), ModelError> {
        if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&level) {
            return Err(ModelError::validation(format!(
                "Skill level must be between {MIN_SKILL_LEVEL} and {MAX_SKILL_LEVEL}, got {level}"
            )));
        }
        Ok(())
    }

    /// Years must be finite, non-negative and a multiple of 0.5.
    #[track_caller]
    pub fn check_years(years: f32) -> Result<(), ModelError> {
        if !years.is_finite() || years < 0.0 {
            return Err(ModelError::validation(format!(
                "Years of experience must be a non-negative number, got {years}"
            )));
        }
        if (years * 2.0).fract() != 0.0 {
            return Err(ModelError::validation(format!(
                "Years of experience must be in steps of 0.5, got {years}"
            )));
        }
        Ok(())
    }
}
