use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Session Actor Error: {message} {location}")]
    Actor {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session Persist Error: {path}: {source} {location}")]
    Persist {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Session Parse Error: {path}: {reason} {location}")]
    Parse {
        path: PathBuf,
        reason: String,
        location: ErrorLocation,
    },
}
