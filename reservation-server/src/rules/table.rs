//! Table payload rules

use serde_json::Value;
use shared::error::{AppError, AppResult};
use shared::models::{DiningTableInput, NewDiningTable, SeatRequest};

use super::fields::{optional_id, required_text};

/// Validate a table payload
pub fn validate_table(input: &DiningTableInput) -> AppResult<NewDiningTable> {
    let table_name = required_text("table_name", input.table_name.as_ref())?;
    let capacity = match &input.capacity {
        None | Some(Value::Null) => return Err(AppError::required_field("capacity")),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(AppError::required_field("capacity"));
        }
        Some(v) => v,
    };

    if table_name.chars().count() < 2 {
        return Err(AppError::invalid_field(
            "table_name",
            format!("'table_name' invalid must be more than 1 character: {table_name}"),
        ));
    }

    let Some(capacity) = capacity.as_i64() else {
        return Err(AppError::invalid_field(
            "capacity",
            "'capacity' invalid must be a number",
        ));
    };
    if capacity <= 0 {
        return Err(AppError::invalid_field(
            "capacity",
            format!("'capacity' invalid must be greater than zero: {capacity}"),
        ));
    }

    let reservation_id = optional_id("reservation_id", input.reservation_id.as_ref())?;

    Ok(NewDiningTable {
        table_name: table_name.to_string(),
        capacity,
        reservation_id,
    })
}

/// The reservation a seat request names
pub fn require_reservation_id(request: &SeatRequest) -> AppResult<i64> {
    optional_id("reservation_id", request.reservation_id.as_ref())?
        .ok_or_else(|| AppError::invalid_field("reservation_id", "reservation_id field must be included"))
}
