//! Route definitions for `/users` profile self-service.

use axum::routing::put;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// PUT /me/email    -> update_email
/// PUT /me/password -> update_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me/email", put(users::update_email))
        .route("/me/password", put(users::update_password))
}
