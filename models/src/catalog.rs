use crate::skill::SkillId;

use serde::{Deserialize, Serialize};

/// Entry of the searchable skill catalog (`GET skills?format=object`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCatalogEntry {
    #[serde(alias = "id")]
    pub skill_id: SkillId,
    pub name: String,
}

/// Entry of the searchable region catalog (`GET location?format=object`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCatalogEntry {
    #[serde(alias = "id")]
    pub region_id: u64,
    pub name: String,
}
