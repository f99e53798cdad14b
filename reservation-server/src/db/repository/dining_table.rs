//! Dining Table Repository

use super::RepoResult;
use shared::models::{DiningTable, NewDiningTable, TableStatus};
use sqlx::SqliteExecutor;

const COLUMNS: &str =
    "table_id, table_name, capacity, status, reservation_id, created_at, updated_at";

pub async fn find_all<'e>(exec: impl SqliteExecutor<'e>) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM tables ORDER BY table_name, table_id"
    ))
    .fetch_all(exec)
    .await?;
    Ok(tables)
}

pub async fn find_by_id<'e>(
    exec: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM tables WHERE table_id = ?"
    ))
    .bind(id)
    .fetch_optional(exec)
    .await?;
    Ok(table)
}

/// Insert a table; occupied iff `data.reservation_id` is set
pub async fn create<'e>(
    exec: impl SqliteExecutor<'e>,
    data: &NewDiningTable,
    now: i64,
) -> RepoResult<DiningTable> {
    let status = match data.reservation_id {
        Some(_) => TableStatus::Occupied,
        None => TableStatus::Free,
    };
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "INSERT INTO tables (table_name, capacity, status, reservation_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.table_name)
    .bind(data.capacity)
    .bind(status)
    .bind(data.reservation_id)
    .bind(now)
    .bind(now)
    .fetch_one(exec)
    .await?;
    Ok(table)
}

/// Assign a reservation to a free table; false when the table was not free
pub async fn occupy<'e>(
    exec: impl SqliteExecutor<'e>,
    table_id: i64,
    reservation_id: i64,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE tables SET status = ?, reservation_id = ?, updated_at = ? \
         WHERE table_id = ? AND status = ?",
    )
    .bind(TableStatus::Occupied)
    .bind(reservation_id)
    .bind(now)
    .bind(table_id)
    .bind(TableStatus::Free)
    .execute(exec)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Release an occupied table; false when the table was not occupied
pub async fn release<'e>(
    exec: impl SqliteExecutor<'e>,
    table_id: i64,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE tables SET status = ?, reservation_id = NULL, updated_at = ? \
         WHERE table_id = ? AND status = ?",
    )
    .bind(TableStatus::Free)
    .bind(now)
    .bind(table_id)
    .bind(TableStatus::Occupied)
    .execute(exec)
    .await?;
    Ok(rows.rows_affected() == 1)
}
