//! Shared types for the reservation service
//!
//! Models, the unified error system and small helpers used by the
//! server and by anything that talks to its JSON API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
