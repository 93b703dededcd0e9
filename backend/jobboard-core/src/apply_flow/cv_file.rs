use crate::config::MAX_CV_BYTES;
use crate::error::ApiError;

use std::path::Path;
use std::sync::Arc;

use log::debug;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MIME_UNKNOWN: &str = "application/octet-stream";

pub const ALLOWED_CV_MIME_TYPES: [&str; 3] = [MIME_PDF, MIME_DOC, MIME_DOCX];

/// A CV picked for upload, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl CvFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ApiError::validation(format!("Cannot read {}: {e}", path.display()))
        })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("cv"));

        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_for_extension)
            .unwrap_or(MIME_UNKNOWN);

        debug!("Read CV {} ({} bytes, {mime})", path.display(), bytes.len());
        Ok(Self::new(name, mime, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "pdf" => Some(MIME_PDF),
        "doc" => Some(MIME_DOC),
        "docx" => Some(MIME_DOCX),
        _ => None,
    }
}

/// Accepts PDF/DOC/DOCX up to `max_bytes` inclusive.
#[track_caller]
pub fn validate_cv(file: &CvFile, max_bytes: u64) -> Result<(), ApiError> {
    if !ALLOWED_CV_MIME_TYPES.contains(&file.mime.as_str()) {
        return Err(ApiError::validation("Only PDF/DOC/DOCX are allowed."));
    }

    let max_bytes = max_bytes.min(MAX_CV_BYTES);
    if file.size() > max_bytes {
        return Err(ApiError::validation(format!(
            "File must be smaller than {} MB.",
            max_bytes.div_ceil(1024 * 1024)
        )));
    }

    Ok(())
}
