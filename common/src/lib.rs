//! Shared primitives for the job board workspace.
//!
//! Everything here is free of HTTP and domain knowledge so that both the
//! `models` crate and `jobboard-core` can depend on it:
//!
//! - [`ErrorLocation`]: file/line/column captured with `#[track_caller]`
//! - [`HttpStatusCode`]: status categorization used by the error taxonomy
//! - [`RedactedSecret`]: credentials that never show up in logs

pub mod error;
pub mod http_status;
pub mod redacted_secret;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
