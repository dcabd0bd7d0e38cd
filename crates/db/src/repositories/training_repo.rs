//! Repository for the `trainings` table.

use gymbook_core::schedule::DayOfWeek;
use gymbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::training::{Training, TrainingInput, TrainingWithDetails};

/// Column list for the `trainings` table.
const COLUMNS: &str =
    "id, name, trainer_id, room_id, day_of_week, time_of_day, end_time, duration_min, \
     created_at, updated_at";

/// Joined column list for listings with room and trainer details.
const DETAIL_COLUMNS: &str = "t.id, t.name, t.day_of_week, t.time_of_day, t.end_time, \
     t.duration_min, t.room_id, r.name AS room_name, r.capacity AS room_capacity, \
     t.trainer_id, p.first_name AS trainer_first_name, p.last_name AS trainer_last_name";

pub struct TrainingRepo;

impl TrainingRepo {
    /// All trainings with room and trainer details, for the public schedule.
    pub async fn list_with_details(pool: &PgPool) -> Result<Vec<TrainingWithDetails>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM trainings t \
             JOIN rooms r ON r.id = t.room_id \
             JOIN profiles p ON p.id = t.trainer_id \
             ORDER BY t.day_of_week, t.time_of_day"
        );
        sqlx::query_as::<_, TrainingWithDetails>(&query)
            .fetch_all(pool)
            .await
    }

    /// A trainer's own sessions, for their schedule and hour report.
    pub async fn list_for_trainer(
        pool: &PgPool,
        trainer_id: DbId,
    ) -> Result<Vec<TrainingWithDetails>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM trainings t \
             JOIN rooms r ON r.id = t.room_id \
             JOIN profiles p ON p.id = t.trainer_id \
             WHERE t.trainer_id = $1 \
             ORDER BY t.day_of_week, t.time_of_day"
        );
        sqlx::query_as::<_, TrainingWithDetails>(&query)
            .bind(trainer_id)
            .fetch_all(pool)
            .await
    }

    /// All trainings scheduled on one day of the week, the input to every
    /// availability scan.
    pub async fn list_by_day(pool: &PgPool, day: DayOfWeek) -> Result<Vec<Training>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trainings WHERE day_of_week = $1");
        sqlx::query_as::<_, Training>(&query)
            .bind(day.as_str())
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Training>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trainings WHERE id = $1");
        sqlx::query_as::<_, Training>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a training with its pre-computed duration. Time strings are
    /// already validated as `HH:MM` by the schedule core, so the `::time`
    /// casts cannot fail.
    pub async fn create(
        pool: &PgPool,
        input: &TrainingInput,
        duration_min: i32,
    ) -> Result<Training, sqlx::Error> {
        let query = format!(
            "INSERT INTO trainings \
                (name, trainer_id, room_id, day_of_week, time_of_day, end_time, duration_min) \
             VALUES ($1, $2, $3, $4, $5::time, $6::time, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(&input.name)
            .bind(input.trainer_id)
            .bind(input.room_id)
            .bind(input.day_of_week.as_str())
            .bind(&input.time_of_day)
            .bind(&input.end_time)
            .bind(duration_min)
            .fetch_one(pool)
            .await
    }

    /// Replace a training's fields. Returns `None` if the id is absent.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &TrainingInput,
        duration_min: i32,
    ) -> Result<Option<Training>, sqlx::Error> {
        let query = format!(
            "UPDATE trainings SET \
                name = $2, trainer_id = $3, room_id = $4, day_of_week = $5, \
                time_of_day = $6::time, end_time = $7::time, duration_min = $8, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.trainer_id)
            .bind(input.room_id)
            .bind(input.day_of_week.as_str())
            .bind(&input.time_of_day)
            .bind(&input.end_time)
            .bind(duration_min)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// How many trainings reference a room, for the deletion guard.
    pub async fn count_for_room(pool: &PgPool, room_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM trainings WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(pool)
            .await
    }

    /// Every training's room reference, one entry per training, for the
    /// per-room occupancy aggregation.
    pub async fn room_refs(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT room_id FROM trainings")
            .fetch_all(pool)
            .await
    }
}
