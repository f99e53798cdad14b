//! Dining Table Model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Table occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TableStatus {
    Free,
    Occupied,
}

impl TableStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Occupied => "occupied",
        }
    }
}

impl Default for TableStatus {
    fn default() -> Self {
        Self::Free
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity
///
/// `reservation_id` is set iff `status` is `occupied`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub table_id: i64,
    pub table_name: String,
    pub capacity: i64,
    pub status: TableStatus,
    pub reservation_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DiningTable {
    pub fn is_occupied(&self) -> bool {
        self.status == TableStatus::Occupied
    }
}

/// Table payload as received from a client, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableInput {
    pub table_name: Option<Value>,
    pub capacity: Option<Value>,
    pub reservation_id: Option<Value>,
}

/// Validated table fields, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiningTable {
    pub table_name: String,
    pub capacity: i64,
    pub reservation_id: Option<i64>,
}

/// Seat payload (`PUT /tables/{id}/seat`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatRequest {
    pub reservation_id: Option<Value>,
}
