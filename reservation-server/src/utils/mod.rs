//! Utility modules

pub mod logger;
pub mod time;

pub use shared::error::{AppError, AppResult, ErrorCode};
