//! Availability checking and collision-aware mutation guards.
//!
//! Single home for every scheduling rule the write paths enforce. The
//! overlap arithmetic itself lives in `gymbook_core::schedule`; this module
//! feeds it the persisted day schedule and turns busy sets into rejections.
//! Both the create and edit handlers, and both availability-check endpoints,
//! call through here so the room and trainer scans can never drift apart.

use gymbook_core::error::CoreError;
use gymbook_core::schedule::{busy_resource_ids, DayOfWeek, ScheduledInterval, TimeSlot};
use gymbook_core::types::DbId;
use gymbook_db::models::training::{Training, TrainingInput};
use gymbook_db::repositories::{BookingRepo, ProfileRepo, RoomRepo, TrainingRepo};
use gymbook_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Request body shared by both availability-check endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub day_of_week: DayOfWeek,
    /// `HH:MM` start time.
    pub time_of_day: String,
    /// `HH:MM` end time.
    pub end_time: String,
    /// When editing, the training being edited, so it does not conflict
    /// with itself.
    pub ignore_training_id: Option<DbId>,
}

impl AvailabilityQuery {
    /// The candidate interval, rejecting non-positive durations up front.
    pub fn slot(&self) -> Result<TimeSlot, CoreError> {
        TimeSlot::from_strings(self.day_of_week, &self.time_of_day, &self.end_time)
    }
}

/// Room ids occupied during the candidate window.
///
/// Read-only and deterministic: the same persisted schedule and candidate
/// always produce the same set. An empty day yields an empty set.
pub async fn busy_room_ids(pool: &DbPool, query: &AvailabilityQuery) -> AppResult<Vec<DbId>> {
    let slot = query.slot()?;
    let intervals = day_intervals(pool, query.day_of_week, |t| t.room_id).await?;
    Ok(busy_resource_ids(&slot, &intervals, query.ignore_training_id))
}

/// Trainer ids occupied during the candidate window.
pub async fn busy_trainer_ids(pool: &DbPool, query: &AvailabilityQuery) -> AppResult<Vec<DbId>> {
    let slot = query.slot()?;
    let intervals = day_intervals(pool, query.day_of_week, |t| t.trainer_id).await?;
    Ok(busy_resource_ids(&slot, &intervals, query.ignore_training_id))
}

/// Fetch the day's schedule and project each training onto one resource
/// dimension (room or trainer).
async fn day_intervals(
    pool: &DbPool,
    day: DayOfWeek,
    resource: fn(&Training) -> DbId,
) -> AppResult<Vec<ScheduledInterval>> {
    let trainings = TrainingRepo::list_by_day(pool, day).await?;
    let mut intervals = Vec::with_capacity(trainings.len());
    for training in &trainings {
        intervals.push(ScheduledInterval {
            training_id: training.id,
            resource_id: resource(training),
            slot: training.time_slot()?,
        });
    }
    Ok(intervals)
}

/// Validate a training create or edit, returning the computed duration in
/// minutes for the repository write.
///
/// Checks, in order:
/// 1. required fields present and well-formed;
/// 2. duration strictly positive (input error, checked before any
///    collision scan);
/// 3. referenced trainer and room exist;
/// 4. the trainer is free in the candidate window, excluding
///    `exclude_training_id` when editing.
///
/// A busy *room* is not a write-time rejection: room conflicts are surfaced
/// as advisory data through [`busy_room_ids`] and the availability
/// endpoints, and the admin UI disables those rooms. The trainer check is
/// the hard rule.
///
/// On success the caller performs exactly one write; on rejection, none.
pub async fn guard_training_write(
    pool: &DbPool,
    input: &TrainingInput,
    exclude_training_id: Option<DbId>,
) -> AppResult<i32> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Training name is required".into(),
        )));
    }

    let slot = TimeSlot::from_strings(input.day_of_week, &input.time_of_day, &input.end_time)?;

    if ProfileRepo::find_by_id(pool, input.trainer_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Trainer",
            id: input.trainer_id,
        }));
    }
    if RoomRepo::find_by_id(pool, input.room_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: input.room_id,
        }));
    }

    let query = AvailabilityQuery {
        day_of_week: input.day_of_week,
        time_of_day: input.time_of_day.clone(),
        end_time: input.end_time.clone(),
        ignore_training_id: exclude_training_id,
    };
    let busy_trainers = busy_trainer_ids(pool, &query).await?;
    if busy_trainers.contains(&input.trainer_id) {
        return Err(AppError::Core(CoreError::Conflict(
            "Trainer is already booked in that time window".into(),
        )));
    }

    Ok(slot.duration_min())
}

/// Reject room deletion while any training still references the room.
pub async fn guard_room_deletion(pool: &DbPool, room_id: DbId) -> AppResult<()> {
    let assigned = TrainingRepo::count_for_room(pool, room_id).await?;
    if assigned > 0 {
        return Err(AppError::Core(CoreError::ResourceInUse(format!(
            "Room has {assigned} assigned training(s)"
        ))));
    }
    Ok(())
}

/// Reject training deletion while any booking still references it.
pub async fn guard_training_deletion(pool: &DbPool, training_id: DbId) -> AppResult<()> {
    let booked = BookingRepo::count_for_training(pool, training_id).await?;
    if booked > 0 {
        return Err(AppError::Core(CoreError::ResourceInUse(format!(
            "Training has {booked} booking(s)"
        ))));
    }
    Ok(())
}

/// Reject a booking when the client already holds one for this training or
/// the training is full.
///
/// The capacity check is authoritative here, not only in the client UI; the
/// duplicate check is additionally backstopped by the unique constraint on
/// (user_id, training_id).
pub async fn guard_booking_creation(
    pool: &DbPool,
    user_id: DbId,
    training_id: DbId,
) -> AppResult<()> {
    let training = TrainingRepo::find_by_id(pool, training_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Training",
            id: training_id,
        }))?;

    if BookingRepo::exists(pool, user_id, training_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Already booked for this training".into(),
        )));
    }

    let room = RoomRepo::find_by_id(pool, training.room_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: training.room_id,
        }))?;
    let booked = BookingRepo::count_for_training(pool, training_id).await?;
    if !gymbook_core::occupancy::has_free_seat(room.capacity, booked) {
        return Err(AppError::Core(CoreError::Conflict(
            "Training is fully booked".into(),
        )));
    }

    Ok(())
}
