use jobboard_core::CoreError;
use jobboard_core::error::{ApiError, ConfigError, SessionError};

use common::ErrorLocation;

use thiserror::Error;

/// Errors surfaced by a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from this app (logging, local files)
    #[error("Jobboard Error: {message} {location}")]
    Jobboard {
        message: String,
        location: ErrorLocation,
    },

    /// The command cannot run with the given arguments or account
    #[error("Usage Error: {message} {location}")]
    Usage {
        message: String,
        location: ErrorLocation,
    },

    /// Error from jobboard-core (API, config, session)
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    #[track_caller]
    pub fn jobboard(message: impl Into<String>) -> Self {
        CliError::Jobboard {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// Short line for the terminal; the full error goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Jobboard { message, .. } | CliError::Usage { message, .. } => {
                message.clone()
            }
            CliError::Core(CoreError::Api(e)) => e.user_message(),
            CliError::Core(e) => e.to_string(),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        CliError::Core(CoreError::Api(error))
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Core(CoreError::Config(error))
    }
}

impl From<SessionError> for CliError {
    fn from(error: SessionError) -> Self {
        CliError::Core(CoreError::Session(error))
    }
}
