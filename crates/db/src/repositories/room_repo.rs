//! Repository for the `rooms` table.

use gymbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::room::{CreateRoom, Room, UpdateRoom};

/// Column list for the `rooms` table.
const COLUMNS: &str = "id, name, capacity, created_at, updated_at";

pub struct RoomRepo;

impl RoomRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY name");
        sqlx::query_as::<_, Room>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (name, capacity) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(&input.name)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET \
                name = COALESCE($2, name), \
                capacity = COALESCE($3, capacity), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a room. Returns `true` if a row was removed. Callers must
    /// check for dependent trainings first; the RESTRICT FK backstops them.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
