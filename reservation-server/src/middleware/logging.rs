//! Request logging middleware
//!
//! Logs every request with its id, method, matched route, status and latency.

use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use http::StatusCode;
use tracing::{Level, info, warn};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// How a finished request is logged
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    level: Level,
    message: &'static str,
}

/// Only server errors are warnings; a client error is routine traffic
fn completion_outcome(status: StatusCode) -> Outcome {
    let (level, message) = if status.is_server_error() {
        (Level::WARN, "Request completed with server error")
    } else if status.is_client_error() {
        (Level::INFO, "Request completed with client error")
    } else {
        (Level::INFO, "Request completed")
    };
    Outcome { level, message }
}

/// Request logging middleware
///
/// Reuses the caller's `x-request-id` or generates one, and echoes it on
/// the response.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Request started"
    );

    let mut response = next.run(req).await;

    let latency = start.elapsed();
    let status = response.status();

    let outcome = completion_outcome(status);
    if outcome.level == Level::WARN {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "{}", outcome.message
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "{}", outcome.message
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
