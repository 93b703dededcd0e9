pub mod api;
pub mod config;
pub mod session;

pub use api::ApiError;
pub use config::ConfigError;
pub use session::SessionError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
