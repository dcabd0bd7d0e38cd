//! Handlers for the `/trainings/rooms` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gymbook_core::error::CoreError;
use gymbook_core::occupancy;
use gymbook_core::types::DbId;
use gymbook_db::models::room::{CreateRoom, Room, UpdateRoom};
use gymbook_db::repositories::{RoomRepo, TrainingRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::scheduling;
use crate::state::AppState;

/// A room enriched with the number of trainings assigned to it.
#[derive(Debug, Serialize)]
pub struct RoomListItem {
    #[serde(flatten)]
    pub room: Room,
    pub assigned_trainings_count: i64,
}

/// GET /api/v1/trainings/rooms
///
/// Staff see this when scheduling; the assigned count backs the admin's
/// room overview.
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RoomListItem>>> {
    let rooms = RoomRepo::list(&state.pool).await?;
    let room_refs = TrainingRepo::room_refs(&state.pool).await?;
    let counts = occupancy::trainings_per_room(&room_refs);

    let items = rooms
        .into_iter()
        .map(|room| {
            let assigned_trainings_count = counts.get(&room.id).copied().unwrap_or(0);
            RoomListItem {
                room,
                assigned_trainings_count,
            }
        })
        .collect();

    Ok(Json(items))
}

/// POST /api/v1/trainings/rooms
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Room name is required".into(),
        )));
    }
    if input.capacity <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Room capacity must be positive".into(),
        )));
    }
    let room = RoomRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// PUT /api/v1/trainings/rooms/{id}
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<Json<Room>> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Room name must not be empty".into(),
            )));
        }
    }
    if let Some(capacity) = input.capacity {
        if capacity <= 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Room capacity must be positive".into(),
            )));
        }
    }
    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))?;
    Ok(Json(room))
}

/// DELETE /api/v1/trainings/rooms/{id}
pub async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    scheduling::guard_room_deletion(&state.pool, id).await?;
    let deleted = RoomRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Room", id }))
    }
}
