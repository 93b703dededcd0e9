pub mod api_client;
pub mod apply_flow;
pub mod config;
pub mod debounce;
pub mod envelope;
pub mod error;
pub mod field_normalizer;
pub mod filter;
pub mod optimistic;
pub mod session;
pub mod views;

#[cfg(test)]
mod tests;

pub use api_client::JobBoardClient;
pub use error::{ApiError, CoreError};
pub use session::{SessionEvent, SessionStore};

pub const JOBBOARD_API_HOSTNAME: &str = "127.0.0.1";
pub const JOBBOARD_API_PORT: u16 = 8000;
pub const DEFAULT_API_BASE_URL: &str = const_format::concatcp!(
    "http://",
    JOBBOARD_API_HOSTNAME,
    ":",
    JOBBOARD_API_PORT,
    "/api/"
);
