//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{
    Reservation, ReservationInput, ReservationStatus, ReservationStatusUpdate, StatusChange,
};
use shared::util::{normalize_mobile_number, now_millis};

use crate::api::extract::{DataJson, parse_id};
use crate::api::{created, ok};
use crate::core::ServerState;
use crate::db::repository::reservation::{self, ReservationFilter};
use crate::rules::{parse_status, validate_reservation};
use crate::seating::{self, check_booked, reservation_not_found};

/// `GET /reservations` query string
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
    pub mobile_number: Option<String>,
    pub include_finished: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(name: &str, value: Option<&str>) -> AppResult<Option<bool>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(AppError::invalid_field(
            name,
            format!("'{name}' must be true or false: {other}"),
        )),
    }
}

fn reservation_id(raw: &str) -> AppResult<i64> {
    parse_id(raw, |raw| reservation_not_found(raw))
}

/// GET /reservations - list reservations
///
/// `date` wins over `mobile_number`. Finished reservations are hidden from
/// the date and unfiltered views and shown in phone search, unless
/// `include_finished` says otherwise.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let (filter, show_finished) = match (non_empty(query.date), non_empty(query.mobile_number)) {
        (Some(date), _) => (ReservationFilter::Date(date), false),
        (None, Some(mobile)) => {
            let digits = normalize_mobile_number(&mobile);
            if digits.is_empty() {
                return Err(AppError::invalid_field(
                    "mobile_number",
                    format!("'mobile_number' must contain at least one digit: {mobile}"),
                ));
            }
            (ReservationFilter::Mobile(digits), true)
        }
        (None, None) => (ReservationFilter::All, false),
    };
    let include_finished = parse_flag("include_finished", query.include_finished.as_deref())?
        .unwrap_or(show_finished);

    let reservations = reservation::list(state.pool(), &filter, include_finished).await?;
    Ok(ok(reservations))
}

/// POST /reservations - create a booking
pub async fn create(
    State(state): State<ServerState>,
    DataJson(input): DataJson<ReservationInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Reservation>>)> {
    let data = validate_reservation(&input, state.now(), &state.config.business_hours)?;
    let created_reservation = reservation::create(state.pool(), &data, now_millis()).await?;

    tracing::info!(
        reservation_id = created_reservation.reservation_id,
        date = %created_reservation.reservation_date,
        time = %created_reservation.reservation_time,
        people = created_reservation.people,
        "Reservation booked"
    );
    Ok(created(created_reservation))
}

/// POST /reservations/validate - run the booking rules only
pub async fn validate(
    State(state): State<ServerState>,
    DataJson(input): DataJson<ReservationInput>,
) -> AppResult<Json<ApiResponse<ValidationResult>>> {
    validate_reservation(&input, state.now(), &state.config.business_hours)?;
    Ok(ok(ValidationResult { valid: true }))
}

/// GET /reservations/{reservation_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let id = reservation_id(&raw_id)?;
    let found = reservation::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| reservation_not_found(id))?;
    Ok(ok(found))
}

/// PUT /reservations/{reservation_id} - edit a booked reservation
pub async fn update(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    DataJson(input): DataJson<ReservationInput>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let id = reservation_id(&raw_id)?;
    let data = validate_reservation(&input, state.now(), &state.config.business_hours)?;

    if let Some(updated) = reservation::update_details(state.pool(), id, &data, now_millis()).await? {
        tracing::info!(reservation_id = id, "Reservation updated");
        return Ok(ok(updated));
    }

    // Nothing matched: either missing or no longer booked
    let existing = reservation::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| reservation_not_found(id))?;
    check_booked(&existing)?;
    Err(AppError::with_message(
        ErrorCode::ReservationNotBooked,
        format!("reservation_id {id} is no longer booked"),
    ))
}

/// PUT /reservations/{reservation_id}/status
///
/// Only cancellation goes through here; seating and finishing belong to
/// the table routes.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    DataJson(update): DataJson<ReservationStatusUpdate>,
) -> AppResult<Json<ApiResponse<StatusChange>>> {
    let id = reservation_id(&raw_id)?;
    let current = reservation::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| reservation_not_found(id))?;

    let next = parse_status(update.status.as_ref())?;
    if next == ReservationStatus::Cancelled {
        return Ok(ok(seating::cancel(state.pool(), id).await?));
    }

    let message = if current.status.can_transition_to(next) {
        match next {
            ReservationStatus::Seated => "'seated' is set by seating the reservation at a table".to_string(),
            _ => "'finished' is set by clearing the reservation's table".to_string(),
        }
    } else {
        format!("a '{}' reservation cannot move to '{next}'", current.status)
    };
    Err(
        AppError::with_message(ErrorCode::ReservationStatusInvalid, message)
            .with_detail("field", "status"),
    )
}
