//! Seating preconditions
//!
//! The rows a transition decides on are loaded once, inside the
//! transaction, and passed around explicitly. Every check here is pure.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, Reservation, ReservationStatus};

/// Table and reservation loaded for a seat transition
#[derive(Debug, Clone)]
pub struct SeatingContext {
    pub table: DiningTable,
    pub reservation: Reservation,
}

impl SeatingContext {
    pub fn new(table: DiningTable, reservation: Reservation) -> Self {
        Self { table, reservation }
    }

    /// Can this reservation sit at this table right now
    pub fn check(&self) -> AppResult<()> {
        if self.table.is_occupied() {
            return Err(AppError::with_message(
                ErrorCode::TableOccupied,
                "This table is currently 'occupied'.",
            )
            .with_detail("table_id", self.table.table_id));
        }
        check_transition(&self.reservation, ReservationStatus::Seated)?;
        check_capacity(self.table.capacity, &self.reservation)
    }
}

/// The reservation must be able to move to `next` from where it is now
pub fn check_transition(reservation: &Reservation, next: ReservationStatus) -> AppResult<()> {
    if reservation.status.can_transition_to(next) {
        return Ok(());
    }
    let code = match reservation.status {
        ReservationStatus::Seated => ErrorCode::ReservationAlreadySeated,
        _ => ErrorCode::ReservationNotBooked,
    };
    Err(AppError::with_message(
        code,
        format!("This reservation is currently '{}'.", reservation.status),
    )
    .with_detail("reservation_id", reservation.reservation_id))
}

/// The reservation must still be `booked`, i.e. not yet seated
pub fn check_booked(reservation: &Reservation) -> AppResult<()> {
    check_transition(reservation, ReservationStatus::Seated)
}

/// The party must fit the table
pub fn check_capacity(capacity: i64, reservation: &Reservation) -> AppResult<()> {
    if capacity < reservation.people {
        return Err(AppError::with_message(
            ErrorCode::TableCapacityExceeded,
            format!(
                "This table does not have enough capacity for your reservation of {} people.",
                reservation.people
            ),
        )
        .with_detail("capacity", capacity));
    }
    Ok(())
}

/// An occupied table and the reservation sitting at it
pub fn check_clearable(table: &DiningTable) -> AppResult<i64> {
    match (table.is_occupied(), table.reservation_id) {
        (true, Some(reservation_id)) => Ok(reservation_id),
        (true, None) => Err(AppError::internal(format!(
            "table {} is occupied without a reservation",
            table.table_id
        ))),
        (false, _) => Err(AppError::with_message(
            ErrorCode::TableNotOccupied,
            "table is not occupied",
        )
        .with_detail("table_id", table.table_id)),
    }
}
