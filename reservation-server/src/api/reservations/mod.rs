//! Reservation API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /reservations | GET | list by `date` or `mobile_number` |
//! | /reservations | POST | create a booking |
//! | /reservations/validate | POST | run the booking rules without saving |
//! | /reservations/{reservation_id} | GET | read one |
//! | /reservations/{reservation_id} | PUT | edit a booked reservation |
//! | /reservations/{reservation_id}/status | PUT | cancel |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use super::method_not_allowed;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/reservations",
            get(handler::list)
                .post(handler::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/reservations/validate",
            post(handler::validate).fallback(method_not_allowed),
        )
        .route(
            "/reservations/{reservation_id}",
            get(handler::get_by_id)
                .put(handler::update)
                .fallback(method_not_allowed),
        )
        .route(
            "/reservations/{reservation_id}/status",
            put(handler::update_status).fallback(method_not_allowed),
        )
}
