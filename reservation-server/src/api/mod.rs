//! HTTP API
//!
//! Every route answers with `{ "data": ... }` or `{ "error": ... }`. Unknown
//! paths are a JSON 404 and unsupported verbs on known paths a JSON 405.

pub mod extract;
pub mod health;
pub mod reservations;
pub mod tables;

use std::time::Duration;

use axum::{
    Json, Router,
    http::{Method, StatusCode, Uri},
    middleware,
};
use shared::error::{ApiResponse, AppError, ErrorCode};
use tower_http::timeout::TimeoutLayer;

use crate::core::ServerState;
use crate::middleware::logging_middleware;

/// Build the application with all routes and layers
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    Router::new()
        .merge(health::router())
        .merge(reservations::router())
        .merge(tables::router())
        .fallback(not_found)
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

pub(crate) fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

pub(crate) fn created<T>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::with_message(
        ErrorCode::NotFound,
        format!("Path not found: {}", uri.path()),
    )
}

pub(crate) async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::method_not_allowed(method.as_str(), uri.path())
}
