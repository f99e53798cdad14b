//! Request extractors

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::{Deserialize, de::DeserializeOwned};
use shared::error::{AppError, AppResult};

const MISSING_DATA: &str = "Body must include a request body data object";

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// JSON body wrapped as `{ "data": { ... } }`
///
/// A body that is not JSON, or has no `data` member, is a 400; the parser's
/// complaint is kept in the `reason` detail.
pub struct DataJson<T>(pub T);

impl<S, T> FromRequest<S> for DataJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(envelope) = Json::<Envelope<T>>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::invalid_request(MISSING_DATA).with_detail("reason", rejection.body_text())
            })?;
        envelope
            .data
            .map(DataJson)
            .ok_or_else(|| AppError::invalid_request(MISSING_DATA))
    }
}

/// Numeric path id; anything else cannot name an existing row
pub fn parse_id(raw: &str, not_found: impl FnOnce(&str) -> AppError) -> AppResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| not_found(raw))
}
