//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{DiningTable, DiningTableInput, SeatRequest, StatusChange};

use crate::api::extract::{DataJson, parse_id};
use crate::api::{created, ok};
use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::rules::{require_reservation_id, validate_table};
use crate::seating::{self, table_not_found};

fn table_id(raw: &str) -> AppResult<i64> {
    parse_id(raw, |raw| table_not_found(raw))
}

/// GET /tables - all tables ordered by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<DiningTable>>>> {
    let tables = dining_table::find_all(state.pool()).await?;
    Ok(ok(tables))
}

/// POST /tables - create a table
pub async fn create(
    State(state): State<ServerState>,
    DataJson(input): DataJson<DiningTableInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<DiningTable>>)> {
    let data = validate_table(&input)?;
    let table = seating::create_table(state.pool(), &data).await?;
    Ok(created(table))
}

/// GET /tables/{table_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    let id = table_id(&raw_id)?;
    let table = dining_table::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| table_not_found(id))?;
    Ok(ok(table))
}

/// PUT /tables/{table_id}/seat - seat a booked reservation
pub async fn seat(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    DataJson(request): DataJson<SeatRequest>,
) -> AppResult<Json<ApiResponse<StatusChange>>> {
    let id = table_id(&raw_id)?;
    let reservation_id = require_reservation_id(&request)?;
    let change = seating::seat(state.pool(), id, reservation_id).await?;
    Ok(ok(change))
}

/// DELETE /tables/{table_id}/seat - finish the seated reservation
pub async fn clear(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<StatusChange>>> {
    let id = table_id(&raw_id)?;
    let change = seating::clear(state.pool(), id).await?;
    Ok(ok(change))
}
