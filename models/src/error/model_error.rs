use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    #[track_caller]
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ModelError::Validation {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation { message, .. } => message,
        }
    }
}
