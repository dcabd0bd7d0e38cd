//! Booking entity model and read models.

use chrono::NaiveTime;
use gymbook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub user_id: DbId,
    pub training_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a booking. The owning client comes from the token.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub training_id: DbId,
}

/// A client's booking joined with its training, room, and trainer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithTraining {
    pub id: DbId,
    pub created_at: Timestamp,
    pub training_id: DbId,
    pub training_name: String,
    pub day_of_week: String,
    pub time_of_day: NaiveTime,
    pub end_time: NaiveTime,
    pub room_name: String,
    pub trainer_first_name: String,
    pub trainer_last_name: String,
}
