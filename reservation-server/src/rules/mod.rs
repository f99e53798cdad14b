//! Business rules
//!
//! Pure validation over client payloads. Nothing here touches the database;
//! "now" and the business hours are passed in by the caller.

pub mod fields;
pub mod hours;
pub mod reservation;
pub mod table;

pub use hours::BusinessHours;
pub use reservation::{parse_status, validate_reservation};
pub use table::{require_reservation_id, validate_table};
