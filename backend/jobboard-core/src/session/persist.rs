//! `session.json`: the only state the client keeps across runs.

use crate::error::session::SessionError;

use common::ErrorLocation;
use models::SessionIdentity;

use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, warn};

const SESSION_FILE_NAME: &str = "session.json";

pub fn session_file(dir: &Path) -> PathBuf {
    dir.join(SESSION_FILE_NAME)
}

/// Read a saved identity. A missing file means "signed out".
pub fn load(path: &Path) -> Result<Option<SessionIdentity>, SessionError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No saved session at {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(SessionError::Persist {
                path: path.to_path_buf(),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            });
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| {
            warn!("Saved session at {} is corrupt: {}", path.display(), e);
            SessionError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
}

/// Write the identity via temp file + rename.
pub fn save(path: &Path, identity: &SessionIdentity) -> Result<(), SessionError> {
    let persist_error = |path: &Path, source: std::io::Error| SessionError::Persist {
        path: path.to_path_buf(),
        location: ErrorLocation::from(Location::caller()),
        source,
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| persist_error(dir, e))?;
    }

    let json = serde_json::to_string_pretty(identity).map_err(|e| SessionError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, json).map_err(|e| persist_error(&temp_path, e))?;
    std::fs::rename(&temp_path, path).map_err(|e| persist_error(path, e))?;

    debug!("Session saved to {}", path.display());
    Ok(())
}

/// Remove the saved identity; already missing is fine.
pub fn clear(path: &Path) -> Result<(), SessionError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SessionError::Persist {
            path: path.to_path_buf(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        }),
    }
}
