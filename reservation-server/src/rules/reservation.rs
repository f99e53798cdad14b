//! Reservation payload rules
//!
//! Checks run in a fixed order and stop at the first failure: required
//! fields, party size, status, date/time format, then the calendar rules.

use chrono::DateTime;
use chrono_tz::Tz;
use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{NewReservation, ReservationInput, ReservationStatus};

use super::BusinessHours;
use super::fields::{optional_text, required_text};
use crate::utils::time::{parse_date, parse_time};

/// Validate a reservation payload against `now` in the business timezone
pub fn validate_reservation(
    input: &ReservationInput,
    now: DateTime<Tz>,
    hours: &BusinessHours,
) -> AppResult<NewReservation> {
    let first_name = required_text("first_name", input.first_name.as_ref())?;
    let last_name = required_text("last_name", input.last_name.as_ref())?;
    let mobile_number = required_text("mobile_number", input.mobile_number.as_ref())?;
    let reservation_date = required_text("reservation_date", input.reservation_date.as_ref())?;
    let reservation_time = required_text("reservation_time", input.reservation_time.as_ref())?;
    let people = required_people(input.people.as_ref())?;

    let people = check_people(people)?;
    check_initial_status(input.status.as_ref())?;

    let date = parse_date(reservation_date)?;
    let time = parse_time(reservation_time)?;
    hours.check(date, time, now)?;

    Ok(NewReservation {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        mobile_number: mobile_number.to_string(),
        date,
        time,
        people,
    })
}

/// Parse the `status` of a status-update payload
pub fn parse_status(status: Option<&Value>) -> AppResult<ReservationStatus> {
    let raw = required_text("status", status)?;
    raw.parse::<ReservationStatus>().map_err(|_| {
        AppError::with_message(
            ErrorCode::ReservationStatusInvalid,
            format!("'status' field must be one of booked, seated, finished, cancelled: {raw}"),
        )
        .with_detail("field", "status")
    })
}

fn required_people(value: Option<&Value>) -> AppResult<&Value> {
    match value {
        None | Some(Value::Null) => Err(AppError::required_field("people")),
        Some(Value::String(s)) if s.trim().is_empty() => Err(AppError::required_field("people")),
        Some(v) => Ok(v),
    }
}

fn check_people(value: &Value) -> AppResult<i64> {
    let Some(n) = value.as_f64() else {
        return Err(AppError::invalid_field(
            "people",
            "'people' field must be a number",
        ));
    };
    if n < 1.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "'people' field must be at least 1",
        )
        .with_detail("field", "people"));
    }
    value.as_i64().ok_or_else(|| {
        AppError::invalid_field("people", "'people' field must be a whole number")
    })
}

fn check_initial_status(status: Option<&Value>) -> AppResult<()> {
    match optional_text("status", status)? {
        None => Ok(()),
        Some(s) if s == ReservationStatus::Booked.as_str() => Ok(()),
        Some(s) => Err(AppError::with_message(
            ErrorCode::ReservationStatusInvalid,
            format!("'status' field cannot be {s}"),
        )
        .with_detail("field", "status")),
    }
}
