use thiserror::Error;

use crate::db::repository::RepoError;

/// Startup and lifecycle errors
///
/// Request-level failures use [`shared::AppError`]; this type only covers
/// what can go wrong while the process boots or shuts down.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] RepoError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
