use super::{FavoriteJobs, load_into};
use crate::api_client::{JobBoardClient, JobQuery};
use crate::apply_flow::{AppliedJobs, ApplyFlow};
use crate::config::MAX_CV_BYTES;
use crate::debounce::DebouncedSearch;
use crate::error::ApiError;
use crate::filter::{FilterSet, compose_cloned};
use crate::optimistic::ViewState;

use models::{JobId, JobPosting, RegionCatalogEntry, SkillId};

use std::sync::Arc;
use std::time::Duration;

/// Seeker-facing job list: text and location search, skill filter, apply.
pub struct JobListings {
    client: JobBoardClient,
    jobs: Arc<ViewState<JobPosting>>,
    filter: FilterSet,
    skills: Vec<SkillId>,
    applied: AppliedJobs,
    favorites: FavoriteJobs,
    max_cv_bytes: u64,
}

impl JobListings {
    pub fn new(client: JobBoardClient, applied: AppliedJobs) -> Self {
        Self {
            client,
            jobs: ViewState::empty(),
            filter: FilterSet::default(),
            skills: Vec::new(),
            applied,
            favorites: FavoriteJobs::new(),
            max_cv_bytes: MAX_CV_BYTES,
        }
    }

    /// Share a favorites set with other screens (e.g. the job detail view).
    pub fn with_favorites(mut self, favorites: FavoriteJobs) -> Self {
        self.favorites = favorites;
        self
    }

    pub fn with_max_cv_bytes(mut self, max_cv_bytes: u64) -> Self {
        self.max_cv_bytes = max_cv_bytes;
        self
    }

    pub fn jobs(&self) -> &Arc<ViewState<JobPosting>> {
        &self.jobs
    }

    /// Load the list for the current skill selection.
    pub async fn load(&self) -> Result<usize, ApiError> {
        let query = JobQuery::Skills(self.skills.clone());
        load_into(&*self.jobs, "jobs", self.client.list_jobs(&query)).await
    }

    /// Skill filtering happens server-side; an empty selection reloads all jobs.
    pub async fn apply_skill_filter(&mut self, skills: Vec<SkillId>) -> Result<usize, ApiError> {
        self.skills = skills;
        self.load().await
    }

    pub fn selected_skills(&self) -> &[SkillId] {
        &self.skills
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.filter.location = location.into();
    }

    pub fn visible(&self) -> Vec<JobPosting> {
        compose_cloned(&self.jobs.snapshot(), &self.filter)
    }

    /// Region suggestions for the location box.
    pub fn region_search(&self, delay: Duration) -> DebouncedSearch<RegionCatalogEntry> {
        let client = self.client.clone();
        DebouncedSearch::new(delay, move |query: String| {
            let client = client.clone();
            async move { client.search_regions(&query).await }
        })
    }

    pub fn is_applied(&self, job_id: JobId) -> bool {
        self.applied.contains(job_id)
    }

    pub fn is_favorite(&self, job_id: JobId) -> bool {
        self.favorites.contains(job_id)
    }

    /// Heart or un-heart a job. Local only; nothing is sent.
    pub fn toggle_favorite(&self, job_id: JobId) -> bool {
        self.favorites.toggle(job_id)
    }

    pub fn favorites(&self) -> &FavoriteJobs {
        &self.favorites
    }

    /// Apply flow for one job, sharing this session's applied set.
    pub fn apply_flow(&self, job_id: JobId) -> ApplyFlow {
        ApplyFlow::new(job_id, self.applied.clone()).with_max_cv_bytes(self.max_cv_bytes)
    }

    pub fn unmount(&self) {
        self.jobs.unmount();
    }
}
