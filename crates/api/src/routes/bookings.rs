//! Route definitions for the `/bookings` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::list).post(bookings::create))
        .route("/{id}", delete(bookings::delete))
}
