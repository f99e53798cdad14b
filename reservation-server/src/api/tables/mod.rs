//! Dining Table API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /tables | GET | list, ordered by name |
//! | /tables, /tables/new | POST | create (optionally seating a reservation) |
//! | /tables/{table_id} | GET | read one |
//! | /tables/{table_id}/seat | PUT | seat a reservation |
//! | /tables/{table_id}/seat | DELETE | clear the table |

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
            "/tables",
            get(handler::list)
                .post(handler::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/tables/new",
            post(handler::create).fallback(method_not_allowed),
        )
        .route(
            "/tables/{table_id}",
            get(handler::get_by_id).fallback(method_not_allowed),
        )
        .route(
            "/tables/{table_id}/seat",
            put(handler::seat)
                .delete(handler::clear)
                .fallback(method_not_allowed),
        )
}
