//! Route definitions for the `/trainings` resource, including rooms and
//! the availability-check endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{rooms, trainings};
use crate::state::AppState;

/// Routes mounted at `/trainings`.
///
/// ```text
/// GET    /                           -> list
/// POST   /                           -> create
/// GET    /trainers                   -> list_trainers
/// GET    /mine                       -> my_trainings
/// POST   /check-room-availability    -> check_room_availability
/// POST   /check-trainer-availability -> check_trainer_availability
/// GET    /rooms                      -> rooms::list
/// POST   /rooms                      -> rooms::create
/// PUT    /rooms/{id}                 -> rooms::update
/// DELETE /rooms/{id}                 -> rooms::delete
/// PUT    /{id}                       -> update
/// DELETE /{id}                       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trainings::list).post(trainings::create))
        .route("/trainers", get(trainings::list_trainers))
        .route("/mine", get(trainings::my_trainings))
        .route(
            "/check-room-availability",
            post(trainings::check_room_availability),
        )
        .route(
            "/check-trainer-availability",
            post(trainings::check_trainer_availability),
        )
        .route("/rooms", get(rooms::list).post(rooms::create))
        .route("/rooms/{id}", put(rooms::update).delete(rooms::delete))
        .route("/{id}", put(trainings::update).delete(trainings::delete))
}
