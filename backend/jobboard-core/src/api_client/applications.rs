use super::JobBoardClient;
use crate::apply_flow::CvFile;
use crate::envelope::{ListEnvelope, decode_item};
use crate::error::ApiError;

use models::{Application, ApplicationAction, ApplicationId, JobId};

use log::{debug, info};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;

const APPLICATION_ENDPOINT: &str = "application/";
const CV_FIELD: &str = "cv";
const RESULT_ENVELOPE: ListEnvelope = ListEnvelope::Keyed("result");

/// Body of a successful apply. `applied == false` means the user had
/// already applied and nothing changed server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplyReceipt {
    #[serde(default)]
    pub applied: bool,
    /// Server-side name of the stored CV.
    #[serde(default)]
    pub cv: Option<String>,
}

impl JobBoardClient {
    /// Apply without attaching a CV.
    pub async fn apply(&self, job_id: JobId) -> Result<ApplyReceipt, ApiError> {
        let url = self.endpoint(&format!("{APPLICATION_ENDPOINT}apply/{job_id}"))?;
        let receipt = self.apply_receipt(self.client.post(url).json(&json!({}))).await?;
        info!("Applied to job {job_id}");
        Ok(receipt)
    }

    /// Apply with a CV as multipart field `cv`. The multipart boundary header
    /// is generated by reqwest.
    pub async fn apply_with_cv(&self, job_id: JobId, cv: &CvFile) -> Result<ApplyReceipt, ApiError> {
        let url = self.endpoint(&format!("{APPLICATION_ENDPOINT}apply/{job_id}"))?;

        let part = Part::bytes(cv.bytes.to_vec())
            .file_name(cv.name.clone())
            .mime_str(&cv.mime)
            .map_err(|e| ApiError::validation(format!("Invalid CV content type '{}': {e}", cv.mime)))?;
        let form = Form::new().part(CV_FIELD, part);

        debug!("Uploading {} ({} bytes) for job {job_id}", cv.name, cv.size());
        let receipt = self.apply_receipt(self.client.post(url).multipart(form)).await?;
        info!("Applied to job {job_id} with CV {}", cv.name);
        Ok(receipt)
    }

    async fn apply_receipt(&self, request: reqwest::RequestBuilder) -> Result<ApplyReceipt, ApiError> {
        let (status, body) = self.send(request).await?;
        if body.is_null() {
            return Ok(ApplyReceipt {
                applied: true,
                cv: None,
            });
        }
        decode_item(status, body)
    }

    /// Applications submitted by the signed-in seeker.
    pub async fn my_applications(&self) -> Result<Vec<Application>, ApiError> {
        let url = self.endpoint(&format!("{APPLICATION_ENDPOINT}application_list"))?;
        self.get_list(url, RESULT_ENVELOPE).await
    }

    /// Applications received for one of the employer's jobs.
    pub async fn candidates(&self, job_id: JobId) -> Result<Vec<Application>, ApiError> {
        // The path spelling is the server's.
        let url = self.endpoint(&format!("{APPLICATION_ENDPOINT}candicate_list/{job_id}"))?;
        self.get_list(url, RESULT_ENVELOPE).await
    }

    pub async fn review_application(
        &self,
        application_id: ApplicationId,
        action: ApplicationAction,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!(
            "{APPLICATION_ENDPOINT}fkoff/{application_id}/{}",
            action.token()
        ))?;
        self.send(self.client.post(url)).await?;
        info!(
            "Application {application_id} -> {}",
            action.target_status()
        );
        Ok(())
    }
}
