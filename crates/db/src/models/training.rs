//! Training entity model, DTOs, and list read models.

use chrono::{NaiveTime, Timelike};
use gymbook_core::error::CoreError;
use gymbook_core::schedule::{DayOfWeek, TimeSlot};
use gymbook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A training row from the `trainings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Training {
    pub id: DbId,
    pub name: String,
    pub trainer_id: DbId,
    pub room_id: DbId,
    pub day_of_week: String,
    pub time_of_day: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_min: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Training {
    /// The `[start, end)` minute interval of this training.
    ///
    /// Falls back to `CoreError::Validation` if the stored day string is
    /// corrupt, which the CHECK constraint makes unreachable in practice.
    pub fn time_slot(&self) -> Result<TimeSlot, CoreError> {
        let day: DayOfWeek = self.day_of_week.parse()?;
        Ok(TimeSlot {
            day,
            start_min: minutes_since_midnight(self.time_of_day),
            end_min: minutes_since_midnight(self.end_time),
        })
    }
}

fn minutes_since_midnight(t: NaiveTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}

/// DTO for creating or replacing a training.
///
/// The admin edit form submits the same full field set as create, so one
/// DTO serves both paths; edit additionally passes the record id for
/// self-exclusion in the collision check.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingInput {
    pub name: String,
    pub trainer_id: DbId,
    pub room_id: DbId,
    pub day_of_week: DayOfWeek,
    /// `HH:MM` start time.
    pub time_of_day: String,
    /// `HH:MM` end time, strictly after the start.
    pub end_time: String,
}

/// A training joined with its room and trainer for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingWithDetails {
    pub id: DbId,
    pub name: String,
    pub day_of_week: String,
    pub time_of_day: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_min: i32,
    pub room_id: DbId,
    pub room_name: String,
    pub room_capacity: i32,
    pub trainer_id: DbId,
    pub trainer_first_name: String,
    pub trainer_last_name: String,
}
