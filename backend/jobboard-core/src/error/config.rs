use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

/// Failures loading, validating or saving `config.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `config.json` exists but could not be read.
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `config.json` is not valid JSON for [`crate::config::ClientConfig`].
    #[error("Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The platform reports no config directory and none was given.
    #[error("Config Directory Not Found Error: {reason} {location}")]
    DirectoryNotFound {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config Serialization Error: {reason} {location}")]
    SerializeError {
        location: ErrorLocation,
        reason: String,
    },

    /// Base URL, timeout, debounce or CV limit out of range.
    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    /// A `JOBBOARD_*` variable could not be parsed.
    #[error("Config Environment Error: {variable}: {reason} {location}")]
    EnvOverride {
        location: ErrorLocation,
        variable: String,
        reason: String,
    },
}
