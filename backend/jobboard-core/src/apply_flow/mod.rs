//! Apply-with-CV state machine.
//!
//! ```text
//! Idle ──select──▶ FileSelected ──submit──▶ Uploading ──ok──▶ Applied
//!                       ▲                        │
//!                       └─────────failure────────┘
//! ```
//!
//! `Applied` is sticky. Jobs applied to are remembered in [`AppliedJobs`],
//! which is shared by every flow of the session so the apply button stays
//! disabled across views.

mod cv_file;

pub use cv_file::{
    ALLOWED_CV_MIME_TYPES, CvFile, MIME_DOC, MIME_DOCX, MIME_PDF, mime_for_extension, validate_cv,
};

use crate::api_client::{ApplyReceipt, JobBoardClient};
use crate::config::MAX_CV_BYTES;
use crate::error::ApiError;

use models::JobId;

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::watch;

const NO_FILE_MESSAGE: &str = "Please choose a CV file.";
const INTERRUPTED_MESSAGE: &str = "Upload was interrupted. Please try again.";

/// Puts an abandoned upload back to `FileSelected` so the flow can retry.
struct UploadGuard<'a> {
    state: &'a watch::Sender<ApplyState>,
    file: Option<CvFile>,
}

impl UploadGuard<'_> {
    /// The upload resolved; the caller decides the next state.
    fn disarm(mut self) {
        self.file = None;
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            warn!("CV upload of {} dropped before it finished", file.name);
            self.state.send_replace(ApplyState::FileSelected {
                file,
                error: Some(INTERRUPTED_MESSAGE.to_string()),
            });
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyState {
    Idle,
    FileSelected { file: CvFile, error: Option<String> },
    Uploading { file: CvFile },
    Applied,
}

/// Result of a submit that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied(ApplyReceipt),
    /// The job was already applied to; nothing was sent.
    AlreadyApplied,
}

/// Job ids the signed-in user has applied to during this session.
#[derive(Clone)]
pub struct AppliedJobs {
    jobs: Arc<watch::Sender<HashSet<JobId>>>,
}

impl AppliedJobs {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(watch::Sender::new(HashSet::new())),
        }
    }

    pub fn contains(&self, job_id: JobId) -> bool {
        self.jobs.borrow().contains(&job_id)
    }

    /// Returns `false` if the job was already present.
    pub fn insert(&self, job_id: JobId) -> bool {
        self.jobs.send_if_modified(|jobs| jobs.insert(job_id))
    }

    pub fn snapshot(&self) -> HashSet<JobId> {
        self.jobs.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HashSet<JobId>> {
        self.jobs.subscribe()
    }
}

impl Default for AppliedJobs {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply flow for one job.
pub struct ApplyFlow {
    job_id: JobId,
    state: watch::Sender<ApplyState>,
    selection_error: Option<String>,
    applied: AppliedJobs,
    max_cv_bytes: u64,
}

impl ApplyFlow {
    pub fn new(job_id: JobId, applied: AppliedJobs) -> Self {
        let initial = if applied.contains(job_id) {
            ApplyState::Applied
        } else {
            ApplyState::Idle
        };

        Self {
            job_id,
            state: watch::Sender::new(initial),
            selection_error: None,
            applied,
            max_cv_bytes: MAX_CV_BYTES,
        }
    }

    pub fn with_max_cv_bytes(mut self, max_cv_bytes: u64) -> Self {
        self.max_cv_bytes = max_cv_bytes;
        self
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn state(&self) -> ApplyState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ApplyState> {
        self.state.subscribe()
    }

    /// Inline message under the file picker, if any.
    pub fn error(&self) -> Option<String> {
        match &*self.state.borrow() {
            ApplyState::FileSelected {
                error: Some(error), ..
            } => Some(error.clone()),
            _ => self.selection_error.clone(),
        }
    }

    /// Whether the apply button should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(*self.state.borrow(), ApplyState::FileSelected { .. })
    }

    /// Pick a CV. An invalid file leaves the state as it was and records the
    /// reason as the inline error.
    pub fn select_file(&mut self, file: CvFile) -> Result<(), ApiError> {
        match self.state() {
            ApplyState::Applied => {
                debug!("Job {} already applied; ignoring file selection", self.job_id);
                return Ok(());
            }
            ApplyState::Uploading { .. } => {
                return Err(ApiError::validation("An upload is already in progress."));
            }
            ApplyState::Idle | ApplyState::FileSelected { .. } => {}
        }

        if let Err(e) = validate_cv(&file, self.max_cv_bytes) {
            warn!("Rejected CV '{}': {}", file.name, e.user_message());
            self.selection_error = Some(e.user_message());
            return Err(e);
        }

        self.selection_error = None;
        self.state
            .send_replace(ApplyState::FileSelected { file, error: None });
        Ok(())
    }

    /// Upload the selected CV through `client`.
    pub async fn submit(&mut self, client: &JobBoardClient) -> Result<ApplyOutcome, ApiError> {
        self.submit_with(|job_id, file| async move { client.apply_with_cv(job_id, &file).await })
            .await
    }

    /// Upload the selected CV with a caller-supplied upload function.
    pub async fn submit_with<F, Fut>(&mut self, upload: F) -> Result<ApplyOutcome, ApiError>
    where
        F: FnOnce(JobId, CvFile) -> Fut,
        Fut: Future<Output = Result<ApplyReceipt, ApiError>>,
    {
        if self.sync_with_applied() {
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        let file = match self.state() {
            ApplyState::Applied => return Ok(ApplyOutcome::AlreadyApplied),
            ApplyState::Idle => {
                self.selection_error = Some(NO_FILE_MESSAGE.to_string());
                return Err(ApiError::validation(NO_FILE_MESSAGE));
            }
            ApplyState::Uploading { .. } => {
                return Err(ApiError::validation("An upload is already in progress."));
            }
            ApplyState::FileSelected { file, .. } => file,
        };

        self.selection_error = None;
        self.state
            .send_replace(ApplyState::Uploading { file: file.clone() });

        let guard = UploadGuard {
            state: &self.state,
            file: Some(file.clone()),
        };
        let result = upload(self.job_id, file.clone()).await;
        guard.disarm();

        match result {
            Ok(receipt) => {
                self.mark_applied();
                info!("Applied to job {} with {}", self.job_id, file.name);
                Ok(ApplyOutcome::Applied(receipt))
            }
            Err(e) => {
                warn!("CV upload for job {} failed: {e}", self.job_id);
                self.state.send_replace(ApplyState::FileSelected {
                    file,
                    error: Some(e.user_message()),
                });
                Err(e)
            }
        }
    }

    /// Apply without a CV. Any selected file is discarded on success.
    pub async fn apply_plain(&mut self, client: &JobBoardClient) -> Result<ApplyOutcome, ApiError> {
        if self.sync_with_applied() {
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        match self.state() {
            ApplyState::Applied => return Ok(ApplyOutcome::AlreadyApplied),
            ApplyState::Uploading { .. } => {
                return Err(ApiError::validation("An upload is already in progress."));
            }
            ApplyState::Idle | ApplyState::FileSelected { .. } => {}
        }

        match client.apply(self.job_id).await {
            Ok(receipt) => {
                self.mark_applied();
                Ok(ApplyOutcome::Applied(receipt))
            }
            Err(e) => {
                self.selection_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Another flow may have applied to this job since this one was created.
    fn sync_with_applied(&mut self) -> bool {
        if !self.applied.contains(self.job_id) {
            return false;
        }
        self.state.send_if_modified(|state| {
            if *state == ApplyState::Applied {
                return false;
            }
            *state = ApplyState::Applied;
            true
        });
        true
    }

    fn mark_applied(&mut self) {
        self.selection_error = None;
        self.applied.insert(self.job_id);
        self.state.send_replace(ApplyState::Applied);
    }
}
