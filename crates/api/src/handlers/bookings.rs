//! Handlers for the `/bookings` resource. Clients only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gymbook_core::error::CoreError;
use gymbook_core::types::DbId;
use gymbook_db::models::booking::{Booking, BookingWithTraining, CreateBooking};
use gymbook_db::repositories::BookingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireClient;
use crate::scheduling;
use crate::state::AppState;

/// POST /api/v1/bookings
///
/// Book the calling client into a training. Rejected when already booked
/// or the training is at capacity.
pub async fn create(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    scheduling::guard_booking_creation(&state.pool, user.user_id, input.training_id).await?;
    let booking = BookingRepo::create(&state.pool, user.user_id, input.training_id).await?;
    tracing::info!(
        booking_id = booking.id,
        training_id = booking.training_id,
        "Booking created"
    );
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/v1/bookings
///
/// The calling client's bookings with training details.
pub async fn list(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookingWithTraining>>> {
    let bookings = BookingRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(bookings))
}

/// DELETE /api/v1/bookings/{id}
///
/// Cancel a booking. Only the owning client may cancel it.
pub async fn delete(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    if booking.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this booking".into(),
        )));
    }

    BookingRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
