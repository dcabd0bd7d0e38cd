pub mod auth;
pub mod bookings;
pub mod health;
pub mod reports;
pub mod trainings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                           register (public)
/// /auth/login                              login (public)
///
/// /trainings                               list (public), create (staff)
/// /trainings/{id}                          update, delete (admin)
/// /trainings/trainers                      trainer picker (admin)
/// /trainings/mine                          own schedule (staff)
/// /trainings/check-room-availability       busy rooms for a window (staff)
/// /trainings/check-trainer-availability    busy trainers for a window (staff)
/// /trainings/rooms                         list (staff), create (admin)
/// /trainings/rooms/{id}                    update, delete (admin)
///
/// /bookings                                list, create (client)
/// /bookings/{id}                           cancel (owning client)
///
/// /users/me/email                          change email (any role)
/// /users/me/password                       change password (any role)
///
/// /reports/clients.xlsx                    roster export (admin)
/// /reports/trainer-hours.xlsx              hour report (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/trainings", trainings::router())
        .nest("/bookings", bookings::router())
        .nest("/users", users::router())
        .nest("/reports", reports::router())
}
