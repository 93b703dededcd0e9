//! Error taxonomy surfaced by every remote call and optimistic mutation.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - 401 is its own variant so callers can send the user back to login
//! - All errors include ErrorLocation for debugging
//! - `#[track_caller]` for automatic location capture

use common::{ErrorLocation, HttpStatusCode};

use serde_json::Value;
use thiserror::Error as ThisError;

const NETWORK_USER_MESSAGE: &str = "Network error - please check your connection and retry.";
const AUTH_EXPIRED_USER_MESSAGE: &str = "Session expired, please login again";

#[derive(Debug, Clone, ThisError)]
pub enum ApiError {
    /// A local precondition failed; the request was never sent.
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    /// The request did not complete (connect, timeout, body read).
    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        location: ErrorLocation,
    },

    /// The server answered with a failure status or an unreadable body.
    #[error("Rejected Error: HTTP {status} - {message} {location}")]
    Rejected {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    /// HTTP 401. The session has already been cleared when this is returned.
    #[error("Auth Expired Error: {message} {location}")]
    AuthExpired {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn network(message: impl Into<String>, is_timeout: bool) -> Self {
        ApiError::Network {
            message: message.into(),
            is_timeout,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn rejected(status: impl Into<HttpStatusCode>, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status: status.into(),
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn auth_expired() -> Self {
        ApiError::AuthExpired {
            message: AUTH_EXPIRED_USER_MESSAGE.to_string(),
            location: ErrorLocation::caller(),
        }
    }

    /// Build a `Rejected` error from a failed response body.
    ///
    /// Uses the JSON `detail`/`message`/`error` field when the server sent one,
    /// otherwise a generic "Server error: {status}".
    #[track_caller]
    pub fn from_response(status: HttpStatusCode, body: &str) -> Self {
        let message =
            extract_server_message(body).unwrap_or_else(|| format!("Server error: {status}"));
        Self::rejected(status, message)
    }

    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::AuthExpired { .. } => Some(HttpStatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired { .. })
    }

    /// Transient failures worth retrying for idempotent reads.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Rejected { status, .. } => status.is_retryable(),
            _ => false,
        }
    }

    /// Message suitable for an inline banner next to the failed control.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Network { .. } => NETWORK_USER_MESSAGE.to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::AuthExpired { .. } => AUTH_EXPIRED_USER_MESSAGE.to_string(),
        }
    }
}

/// Pull a human readable message out of an error body.
///
/// Handles `{"detail": "..."}`, FastAPI's `{"detail": [{"msg": "..."}]}`, and
/// `{"message": "..."}` / `{"error": "..."}`.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["detail", "message", "error"] {
        match object.get(key) {
            Some(Value::String(message)) if !message.trim().is_empty() => {
                return Some(message.clone());
            }
            Some(Value::Array(items)) => {
                let joined = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join("; ");
                if !joined.is_empty() {
                    return Some(joined);
                }
            }
            _ => {}
        }
    }

    None
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::validation(format!("Invalid request URL: {error}"))
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ApiError::network(error.to_string(), error.is_timeout())
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiError::validation(format!("Invalid JSON: {error}"))
    }
}

impl From<models::ModelError> for ApiError {
    #[track_caller]
    fn from(error: models::ModelError) -> Self {
        ApiError::validation(error.message())
    }
}
