//! Reservation Model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Reservation lifecycle status
///
/// `booked → seated → finished`, with `cancelled` reachable only from
/// `booked`. `finished` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ReservationStatus {
    Booked,
    Seated,
    Finished,
    Cancelled,
}

impl ReservationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Seated => "seated",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }

    /// Legal single-step transitions of the reservation state machine
    pub const fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Booked, Self::Seated)
                | (Self::Booked, Self::Cancelled)
                | (Self::Seated, Self::Finished)
        )
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::Booked
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(Self::Booked),
            "seated" => Ok(Self::Seated),
            "finished" => Ok(Self::Finished),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Reservation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub reservation_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    /// `YYYY-MM-DD`
    pub reservation_date: String,
    /// `HH:MM:SS`
    pub reservation_time: String,
    pub people: i64,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Reservation payload as received from a client, before validation
///
/// Every field is kept as raw JSON so that missing or mistyped values can
/// be reported with a field-specific message instead of failing the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationInput {
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub mobile_number: Option<Value>,
    pub reservation_date: Option<Value>,
    pub reservation_time: Option<Value>,
    pub people: Option<Value>,
    pub status: Option<Value>,
}

/// Validated reservation fields, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub people: i64,
}

impl NewReservation {
    /// Stored date form (`YYYY-MM-DD`)
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Stored time form (`HH:MM:SS`), sortable as text
    pub fn time_string(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

/// Status update payload (`PUT /reservations/{id}/status`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: Option<Value>,
}

/// Status returned by transition endpoints (`{"status": "seated"}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: ReservationStatus,
}
