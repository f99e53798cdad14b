//! Reservation Repository

use super::RepoResult;
use shared::models::{NewReservation, Reservation, ReservationStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor};

const COLUMNS: &str = "reservation_id, first_name, last_name, mobile_number, reservation_date, \
                       reservation_time, people, status, created_at, updated_at";

/// Strips the formatting characters people type into phone numbers
const NORMALIZED_MOBILE: &str =
    "REPLACE(REPLACE(REPLACE(REPLACE(mobile_number, '(', ''), ')', ''), '-', ''), ' ', '')";

/// Which reservations a listing returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationFilter {
    /// Reservations on one date, ordered by time
    Date(String),
    /// Reservations whose mobile number contains these digits, ordered by date
    Mobile(String),
    /// Everything, ordered by date then time
    All,
}

pub async fn find_by_id<'e>(
    exec: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservations WHERE reservation_id = ?"
    ))
    .bind(id)
    .fetch_optional(exec)
    .await?;
    Ok(reservation)
}

/// List reservations
///
/// `finished` rows are left out unless `include_finished` is set.
pub async fn list<'e>(
    exec: impl SqliteExecutor<'e>,
    filter: &ReservationFilter,
    include_finished: bool,
) -> RepoResult<Vec<Reservation>> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM reservations WHERE 1 = 1"));

    match filter {
        ReservationFilter::Date(date) => {
            qb.push(" AND reservation_date = ").push_bind(date.clone());
        }
        ReservationFilter::Mobile(digits) => {
            qb.push(format!(" AND {NORMALIZED_MOBILE} LIKE "))
                .push_bind(format!("%{digits}%"));
        }
        ReservationFilter::All => {}
    }

    if !include_finished {
        qb.push(" AND status != ")
            .push_bind(ReservationStatus::Finished.as_str());
    }

    qb.push(match filter {
        ReservationFilter::Date(_) => " ORDER BY reservation_time, reservation_id",
        ReservationFilter::Mobile(_) => " ORDER BY reservation_date, reservation_time",
        ReservationFilter::All => " ORDER BY reservation_date, reservation_time",
    });

    let reservations = qb
        .build_query_as::<Reservation>()
        .fetch_all(exec)
        .await?;
    Ok(reservations)
}

pub async fn create<'e>(
    exec: impl SqliteExecutor<'e>,
    data: &NewReservation,
    now: i64,
) -> RepoResult<Reservation> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "INSERT INTO reservations \
         (first_name, last_name, mobile_number, reservation_date, reservation_time, people, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.mobile_number)
    .bind(data.date_string())
    .bind(data.time_string())
    .bind(data.people)
    .bind(ReservationStatus::Booked)
    .bind(now)
    .bind(now)
    .fetch_one(exec)
    .await?;
    Ok(reservation)
}

/// Replace the guest-editable fields of a `booked` reservation
///
/// Returns `None` when the reservation is missing or no longer booked.
pub async fn update_details<'e>(
    exec: impl SqliteExecutor<'e>,
    id: i64,
    data: &NewReservation,
    now: i64,
) -> RepoResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "UPDATE reservations SET first_name = ?, last_name = ?, mobile_number = ?, \
         reservation_date = ?, reservation_time = ?, people = ?, updated_at = ? \
         WHERE reservation_id = ? AND status = ? RETURNING {COLUMNS}"
    ))
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.mobile_number)
    .bind(data.date_string())
    .bind(data.time_string())
    .bind(data.people)
    .bind(now)
    .bind(id)
    .bind(ReservationStatus::Booked)
    .fetch_optional(exec)
    .await?;
    Ok(reservation)
}

/// Move a reservation from `from` to `to`
///
/// Conditional on the current status; returns false when nothing matched.
pub async fn update_status<'e>(
    exec: impl SqliteExecutor<'e>,
    id: i64,
    from: ReservationStatus,
    to: ReservationStatus,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE reservations SET status = ?, updated_at = ? WHERE reservation_id = ? AND status = ?",
    )
    .bind(to)
    .bind(now)
    .bind(id)
    .bind(from)
    .execute(exec)
    .await?;
    Ok(rows.rows_affected() == 1)
}
