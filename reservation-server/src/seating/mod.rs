//! Seating transitions
//!
//! Each transition reads, checks and writes inside one `BEGIN IMMEDIATE`
//! transaction, so the write lock is held before the first read and
//! concurrent transitions queue on the busy timeout instead of failing
//! the lock upgrade. The writes are still conditional on the state that
//! was checked; if one matches nothing the whole transaction rolls back.

mod context;

pub use context::{SeatingContext, check_booked, check_capacity, check_clearable, check_transition};

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, NewDiningTable, ReservationStatus, StatusChange};
use shared::util::now_millis;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::db::repository::{RepoError, dining_table, reservation};

/// `table_id 'x' does not exist`
pub fn table_not_found(table_id: impl std::fmt::Display) -> AppError {
    AppError::with_message(
        ErrorCode::TableNotFound,
        format!("table_id '{table_id}' does not exist"),
    )
}

/// `reservation_id x does not exist`
pub fn reservation_not_found(reservation_id: impl std::fmt::Display) -> AppError {
    AppError::with_message(
        ErrorCode::ReservationNotFound,
        format!("reservation_id {reservation_id} does not exist"),
    )
}

/// Lost a race: the row changed between the read and the write
fn conflict(code: ErrorCode, message: impl Into<String>) -> AppError {
    AppError::with_message(code, message)
}

/// Open a transaction that takes the database write lock immediately
async fn begin_write(pool: &SqlitePool) -> AppResult<Transaction<'static, Sqlite>> {
    let tx = pool
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(RepoError::from)?;
    Ok(tx)
}

/// Seat a booked reservation at a free table
pub async fn seat(pool: &SqlitePool, table_id: i64, reservation_id: i64) -> AppResult<StatusChange> {
    let mut tx = begin_write(pool).await?;

    let table = dining_table::find_by_id(&mut *tx, table_id)
        .await?
        .ok_or_else(|| table_not_found(table_id))?;
    let booking = reservation::find_by_id(&mut *tx, reservation_id)
        .await?
        .ok_or_else(|| reservation_not_found(reservation_id))?;

    let ctx = SeatingContext::new(table, booking);
    ctx.check()?;

    let now = now_millis();
    if !dining_table::occupy(&mut *tx, table_id, reservation_id, now).await? {
        return Err(conflict(
            ErrorCode::TableOccupied,
            "This table is currently 'occupied'.",
        ));
    }
    if !reservation::update_status(
        &mut *tx,
        reservation_id,
        ReservationStatus::Booked,
        ReservationStatus::Seated,
        now,
    )
    .await?
    {
        return Err(conflict(
            ErrorCode::ReservationNotBooked,
            format!("reservation_id {reservation_id} is no longer booked"),
        ));
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        table_id,
        reservation_id,
        people = ctx.reservation.people,
        "Reservation seated"
    );
    Ok(StatusChange {
        status: ReservationStatus::Seated,
    })
}

/// Free an occupied table and finish its reservation
pub async fn clear(pool: &SqlitePool, table_id: i64) -> AppResult<StatusChange> {
    let mut tx = begin_write(pool).await?;

    let table = dining_table::find_by_id(&mut *tx, table_id)
        .await?
        .ok_or_else(|| table_not_found(table_id))?;
    let reservation_id = check_clearable(&table)?;

    let now = now_millis();
    if !dining_table::release(&mut *tx, table_id, now).await? {
        return Err(conflict(ErrorCode::TableNotOccupied, "table is not occupied"));
    }
    if !reservation::update_status(
        &mut *tx,
        reservation_id,
        ReservationStatus::Seated,
        ReservationStatus::Finished,
        now,
    )
    .await?
    {
        return Err(conflict(
            ErrorCode::ReservationStatusInvalid,
            format!("reservation_id {reservation_id} is not seated"),
        ));
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(table_id, reservation_id, "Table cleared");
    Ok(StatusChange {
        status: ReservationStatus::Finished,
    })
}

/// Cancel a booked reservation
pub async fn cancel(pool: &SqlitePool, reservation_id: i64) -> AppResult<StatusChange> {
    let mut tx = begin_write(pool).await?;

    let booking = reservation::find_by_id(&mut *tx, reservation_id)
        .await?
        .ok_or_else(|| reservation_not_found(reservation_id))?;
    check_transition(&booking, ReservationStatus::Cancelled)?;

    if !reservation::update_status(
        &mut *tx,
        reservation_id,
        ReservationStatus::Booked,
        ReservationStatus::Cancelled,
        now_millis(),
    )
    .await?
    {
        return Err(conflict(
            ErrorCode::ReservationNotBooked,
            format!("reservation_id {reservation_id} is no longer booked"),
        ));
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(reservation_id, "Reservation cancelled");
    Ok(StatusChange {
        status: ReservationStatus::Cancelled,
    })
}

/// Create a table, seating `data.reservation_id` at it when given
pub async fn create_table(pool: &SqlitePool, data: &NewDiningTable) -> AppResult<DiningTable> {
    let Some(reservation_id) = data.reservation_id else {
        let table = dining_table::create(pool, data, now_millis()).await?;
        tracing::info!(table_id = table.table_id, name = %table.table_name, "Table created");
        return Ok(table);
    };

    let mut tx = begin_write(pool).await?;

    let booking = reservation::find_by_id(&mut *tx, reservation_id)
        .await?
        .ok_or_else(|| reservation_not_found(reservation_id))?;
    check_transition(&booking, ReservationStatus::Seated)?;
    check_capacity(data.capacity, &booking)?;

    let now = now_millis();
    let table = dining_table::create(&mut *tx, data, now).await?;
    if !reservation::update_status(
        &mut *tx,
        reservation_id,
        ReservationStatus::Booked,
        ReservationStatus::Seated,
        now,
    )
    .await?
    {
        return Err(conflict(
            ErrorCode::ReservationNotBooked,
            format!("reservation_id {reservation_id} is no longer booked"),
        ));
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        table_id = table.table_id,
        reservation_id,
        name = %table.table_name,
        "Table created with seated reservation"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use chrono::{NaiveDate, NaiveTime};
    use shared::models::{NewReservation, TableStatus};

    async fn book(pool: &SqlitePool, people: i64) -> i64 {
        let data = NewReservation {
            first_name: "Beth".into(),
            last_name: "Smith".into(),
            mobile_number: "555-0199".into(),
            date: NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            people,
        };
        reservation::create(pool, &data, 1).await.unwrap().reservation_id
    }

    async fn table(pool: &SqlitePool, name: &str, capacity: i64) -> i64 {
        let data = NewDiningTable {
            table_name: name.into(),
            capacity,
            reservation_id: None,
        };
        create_table(pool, &data).await.unwrap().table_id
    }

    async fn status_of(pool: &SqlitePool, reservation_id: i64) -> ReservationStatus {
        reservation::find_by_id(pool, reservation_id)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn test_seat_then_clear() {
        let pool = test_pool().await;
        let rid = book(&pool, 2).await;
        let tid = table(&pool, "#1", 6).await;

        let change = seat(&pool, tid, rid).await.unwrap();
        assert_eq!(change.status, ReservationStatus::Seated);
        assert_eq!(status_of(&pool, rid).await, ReservationStatus::Seated);
        let t = dining_table::find_by_id(&pool, tid).await.unwrap().unwrap();
        assert_eq!(t.reservation_id, Some(rid));

        let change = clear(&pool, tid).await.unwrap();
        assert_eq!(change.status, ReservationStatus::Finished);
        assert_eq!(status_of(&pool, rid).await, ReservationStatus::Finished);
        let t = dining_table::find_by_id(&pool, tid).await.unwrap().unwrap();
        assert_eq!(t.status, TableStatus::Free);
        assert_eq!(t.reservation_id, None);
    }

    #[tokio::test]
    async fn test_seat_failure_leaves_no_trace() {
        let pool = test_pool().await;
        let rid = book(&pool, 8).await;
        let tid = table(&pool, "Bar #1", 1).await;

        let err = seat(&pool, tid, rid).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TableCapacityExceeded);
        assert_eq!(status_of(&pool, rid).await, ReservationStatus::Booked);
        let t = dining_table::find_by_id(&pool, tid).await.unwrap().unwrap();
        assert_eq!(t.status, TableStatus::Free);
    }

    #[tokio::test]
    async fn test_seat_missing_rows() {
        let pool = test_pool().await;
        let rid = book(&pool, 2).await;
        let tid = table(&pool, "#2", 4).await;

        let err = seat(&pool, 404, rid).await.unwrap_err();
        assert_eq!(err.message, "table_id '404' does not exist");
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);

        let err = seat(&pool, tid, 999).await.unwrap_err();
        assert_eq!(err.message, "reservation_id 999 does not exist");
        assert_eq!(err.code, ErrorCode::ReservationNotFound);
    }

    #[tokio::test]
    async fn test_seat_twice() {
        let pool = test_pool().await;
        let rid = book(&pool, 2).await;
        let first = table(&pool, "#1", 4).await;
        let second = table(&pool, "#2", 4).await;

        seat(&pool, first, rid).await.unwrap();
        let err = seat(&pool, first, rid).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TableOccupied);

        let err = seat(&pool, second, rid).await.unwrap_err();
        assert_eq!(err.message, "This reservation is currently 'seated'.");
    }

    #[tokio::test]
    async fn test_clear_free_table() {
        let pool = test_pool().await;
        let tid = table(&pool, "#1", 4).await;
        let err = clear(&pool, tid).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TableNotOccupied);
        assert_eq!(clear(&pool, 77).await.unwrap_err().code, ErrorCode::TableNotFound);
    }

    #[tokio::test]
    async fn test_cancel_only_booked() {
        let pool = test_pool().await;
        let rid = book(&pool, 2).await;
        assert_eq!(
            cancel(&pool, rid).await.unwrap().status,
            ReservationStatus::Cancelled
        );
        let err = cancel(&pool, rid).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationNotBooked);
        assert_eq!(
            cancel(&pool, 12345).await.unwrap_err().code,
            ErrorCode::ReservationNotFound
        );
    }

    #[tokio::test]
    async fn test_create_table_with_reservation() {
        let pool = test_pool().await;
        let rid = book(&pool, 3).await;

        let too_small = NewDiningTable {
            table_name: "Nook".into(),
            capacity: 2,
            reservation_id: Some(rid),
        };
        let err = create_table(&pool, &too_small).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TableCapacityExceeded);
        assert!(dining_table::find_all(&pool).await.unwrap().is_empty());

        let data = NewDiningTable {
            table_name: "Nook".into(),
            capacity: 4,
            reservation_id: Some(rid),
        };
        let t = create_table(&pool, &data).await.unwrap();
        assert_eq!(t.status, TableStatus::Occupied);
        assert_eq!(t.reservation_id, Some(rid));
        assert_eq!(status_of(&pool, rid).await, ReservationStatus::Seated);

        let err = create_table(&pool, &data).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationAlreadySeated);

        let missing = NewDiningTable {
            reservation_id: Some(31337),
            ..data
        };
        assert_eq!(
            create_table(&pool, &missing).await.unwrap_err().code,
            ErrorCode::ReservationNotFound
        );
    }
}
