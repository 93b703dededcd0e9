//! View models: one per screen that owns a collection.
//!
//! Each view holds its own [`ViewState`] for as long as it is mounted.
//! List loads never leave a view half-populated: a failed load shows an
//! empty list plus the error banner.

mod applications;
mod candidates;
mod companies;
mod employer_jobs;
mod favorites;
mod job_listings;
mod skills;

pub use applications::MyApplications;
pub use candidates::CandidateReview;
pub use companies::CompanyDirectory;
pub use employer_jobs::EmployerJobBoard;
pub use favorites::FavoriteJobs;
pub use job_listings::JobListings;
pub use skills::SkillsPicker;

use crate::error::ApiError;
use crate::optimistic::{Keyed, ViewState};

use std::future::Future;

use log::{debug, warn};

/// Run a list load and publish its result into `state`.
pub(crate) async fn load_into<T, Fut>(
    state: &ViewState<T>,
    what: &str,
    load: Fut,
) -> Result<usize, ApiError>
where
    T: Keyed,
    Fut: Future<Output = Result<Vec<T>, ApiError>>,
{
    match load.await {
        Ok(items) => {
            let count = items.len();
            debug!("Loaded {count} {what}");
            state.replace_all(items);
            state.clear_error();
            Ok(count)
        }
        Err(e) => {
            warn!("Loading {what} failed: {e}");
            state.replace_all(Vec::new());
            state.set_error(e.user_message());
            Err(e)
        }
    }
}
