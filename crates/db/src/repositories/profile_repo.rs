//! Repository for the `profiles` table.

use gymbook_core::roles::{ROLE_CLIENT, ROLE_TRAINER};
use gymbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{ClientRosterRow, Profile, TrainerSummary};

/// Column list for the `profiles` table.
const COLUMNS: &str = "id, email, password_hash, role, first_name, last_name, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile with an already-hashed password.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        role: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (email, password_hash, role, first_name, last_name) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .bind(first_name)
            .bind(last_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE email = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All trainer profiles, for the admin's trainer picker.
    pub async fn list_trainers(pool: &PgPool) -> Result<Vec<TrainerSummary>, sqlx::Error> {
        sqlx::query_as::<_, TrainerSummary>(
            "SELECT id, first_name, last_name FROM profiles \
             WHERE role = $1 \
             ORDER BY last_name, first_name",
        )
        .bind(ROLE_TRAINER)
        .fetch_all(pool)
        .await
    }

    /// All client profiles with their booking counts, for the roster export.
    pub async fn clients_with_booking_counts(
        pool: &PgPool,
    ) -> Result<Vec<ClientRosterRow>, sqlx::Error> {
        sqlx::query_as::<_, ClientRosterRow>(
            "SELECT p.id, p.first_name, p.last_name, p.email, COUNT(b.id) AS bookings_count \
             FROM profiles p \
             LEFT JOIN bookings b ON b.user_id = p.id \
             WHERE p.role = $1 \
             GROUP BY p.id \
             ORDER BY p.last_name, p.first_name",
        )
        .bind(ROLE_CLIENT)
        .fetch_all(pool)
        .await
    }

    /// Update the caller's email. Returns `false` if the profile is gone.
    pub async fn update_email(pool: &PgPool, id: DbId, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE profiles SET email = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the caller's password hash.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE profiles SET password_hash = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
