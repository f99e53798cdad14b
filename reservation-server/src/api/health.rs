//! Health check
//!
//! ```json
//! { "data": { "status": "ok", "version": "0.1.0", "database": "ok" } }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shared::error::ApiResponse;

use super::{method_not_allowed, ok};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health).fallback(method_not_allowed))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    /// ok | error
    database: &'static str,
}

async fn health(State(state): State<ServerState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!("Health check database query failed: {}", e);
            "error"
        }
    };
    ok(HealthResponse {
        status: if database == "ok" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}
