//! Repository for the `bookings` table.

use gymbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{Booking, BookingWithTraining};

/// Column list for the `bookings` table.
const COLUMNS: &str = "id, user_id, training_id, created_at";

pub struct BookingRepo;

impl BookingRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        training_id: DbId,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (user_id, training_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(training_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the client already holds a booking for this training.
    pub async fn exists(
        pool: &PgPool,
        user_id: DbId,
        training_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE user_id = $1 AND training_id = $2)",
        )
        .bind(user_id)
        .bind(training_id)
        .fetch_one(pool)
        .await
    }

    /// How many bookings a training holds, for the capacity check and the
    /// training deletion guard.
    pub async fn count_for_training(
        pool: &PgPool,
        training_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE training_id = $1")
            .bind(training_id)
            .fetch_one(pool)
            .await
    }

    /// Every booking's training reference, one entry per booking, for the
    /// per-training occupancy aggregation on list paths.
    pub async fn training_refs(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT training_id FROM bookings")
            .fetch_all(pool)
            .await
    }

    /// A client's bookings with training, room, and trainer details.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<BookingWithTraining>, sqlx::Error> {
        sqlx::query_as::<_, BookingWithTraining>(
            "SELECT b.id, b.created_at, t.id AS training_id, t.name AS training_name, \
                    t.day_of_week, t.time_of_day, t.end_time, \
                    r.name AS room_name, \
                    p.first_name AS trainer_first_name, p.last_name AS trainer_last_name \
             FROM bookings b \
             JOIN trainings t ON t.id = b.training_id \
             JOIN rooms r ON r.id = t.room_id \
             JOIN profiles p ON p.id = t.trainer_id \
             WHERE b.user_id = $1 \
             ORDER BY b.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
