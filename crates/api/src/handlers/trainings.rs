//! Handlers for the `/trainings` resource: the weekly schedule, training
//! CRUD behind the collision guard, and the availability-check endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gymbook_core::error::CoreError;
use gymbook_core::occupancy;
use gymbook_core::types::DbId;
use gymbook_db::models::profile::TrainerSummary;
use gymbook_db::models::training::{Training, TrainingInput, TrainingWithDetails};
use gymbook_db::repositories::{BookingRepo, ProfileRepo, TrainingRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::scheduling::{self, AvailabilityQuery};
use crate::state::AppState;

/// A schedule entry enriched with seat occupancy.
#[derive(Debug, Serialize)]
pub struct TrainingListItem {
    #[serde(flatten)]
    pub training: TrainingWithDetails,
    pub booked_count: i64,
    pub free_seats: i64,
}

/// A trainer's own schedule plus their weekly hour total.
#[derive(Debug, Serialize)]
pub struct TrainerSchedule {
    pub trainings: Vec<TrainingWithDetails>,
    pub total_hours: f64,
}

/// Busy rooms for a candidate window. Key name matches the UI contract.
#[derive(Debug, Serialize)]
pub struct BusyRoomsResponse {
    #[serde(rename = "busyRoomIds")]
    pub busy_room_ids: Vec<DbId>,
}

/// Busy trainers for a candidate window.
#[derive(Debug, Serialize)]
pub struct BusyTrainersResponse {
    #[serde(rename = "busyTrainerIds")]
    pub busy_trainer_ids: Vec<DbId>,
}

/// GET /api/v1/trainings
///
/// Public weekly schedule with booked/free seat counts per training.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TrainingListItem>>> {
    let trainings = TrainingRepo::list_with_details(&state.pool).await?;
    let booking_refs = BookingRepo::training_refs(&state.pool).await?;
    let counts = occupancy::bookings_per_training(&booking_refs);

    let items = trainings
        .into_iter()
        .map(|t| {
            let booked = counts.get(&t.id).copied().unwrap_or(0);
            let usage = occupancy::seat_usage(t.room_capacity, booked);
            TrainingListItem {
                training: t,
                booked_count: usage.booked,
                free_seats: usage.free,
            }
        })
        .collect();

    Ok(Json(items))
}

/// GET /api/v1/trainings/trainers
pub async fn list_trainers(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TrainerSummary>>> {
    let trainers = ProfileRepo::list_trainers(&state.pool).await?;
    Ok(Json(trainers))
}

/// GET /api/v1/trainings/mine
///
/// The calling trainer's own sessions with their weekly hour total.
pub async fn my_trainings(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<TrainerSchedule>> {
    let trainings = TrainingRepo::list_for_trainer(&state.pool, user.user_id).await?;
    let total_minutes: i64 = trainings.iter().map(|t| i64::from(t.duration_min)).sum();
    Ok(Json(TrainerSchedule {
        trainings,
        total_hours: total_minutes as f64 / 60.0,
    }))
}

/// POST /api/v1/trainings
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<TrainingInput>,
) -> AppResult<(StatusCode, Json<Training>)> {
    let duration_min = scheduling::guard_training_write(&state.pool, &input, None).await?;
    let training = TrainingRepo::create(&state.pool, &input, duration_min).await?;
    tracing::info!(training_id = training.id, "Training created");
    Ok((StatusCode::CREATED, Json(training)))
}

/// PUT /api/v1/trainings/{id}
///
/// Same guard as create, excluding the edited record from the collision
/// scan so an unchanged schedule does not conflict with itself.
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TrainingInput>,
) -> AppResult<Json<Training>> {
    let duration_min = scheduling::guard_training_write(&state.pool, &input, Some(id)).await?;
    let training = TrainingRepo::update(&state.pool, id, &input, duration_min)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Training",
            id,
        }))?;
    Ok(Json(training))
}

/// DELETE /api/v1/trainings/{id}
pub async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    scheduling::guard_training_deletion(&state.pool, id).await?;
    let deleted = TrainingRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Training",
            id,
        }))
    }
}

/// POST /api/v1/trainings/check-room-availability
pub async fn check_room_availability(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(query): Json<AvailabilityQuery>,
) -> AppResult<Json<BusyRoomsResponse>> {
    let busy_room_ids = scheduling::busy_room_ids(&state.pool, &query).await?;
    Ok(Json(BusyRoomsResponse { busy_room_ids }))
}

/// POST /api/v1/trainings/check-trainer-availability
pub async fn check_trainer_availability(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(query): Json<AvailabilityQuery>,
) -> AppResult<Json<BusyTrainersResponse>> {
    let busy_trainer_ids = scheduling::busy_trainer_ids(&state.pool, &query).await?;
    Ok(Json(BusyTrainersResponse { busy_trainer_ids }))
}
