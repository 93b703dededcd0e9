use models::JobId;

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

/// Jobs the user has hearted during this session. Kept locally only; the
/// backend has no favorites resource.
#[derive(Clone)]
pub struct FavoriteJobs {
    jobs: Arc<watch::Sender<HashSet<JobId>>>,
}

impl FavoriteJobs {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(watch::Sender::new(HashSet::new())),
        }
    }

    pub fn contains(&self, job_id: JobId) -> bool {
        self.jobs.borrow().contains(&job_id)
    }

    /// Flip the heart on `job_id`. Returns whether it is now a favorite.
    pub fn toggle(&self, job_id: JobId) -> bool {
        let mut now_favorite = false;
        self.jobs.send_modify(|jobs| {
            now_favorite = jobs.insert(job_id);
            if !now_favorite {
                jobs.remove(&job_id);
            }
        });
        debug!("Job {job_id} favorite: {now_favorite}");
        now_favorite
    }

    pub fn snapshot(&self) -> HashSet<JobId> {
        self.jobs.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HashSet<JobId>> {
        self.jobs.subscribe()
    }
}

impl Default for FavoriteJobs {
    fn default() -> Self {
        Self::new()
    }
}
