//! Profile entity model and DTOs.

use gymbook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A profile row from the `profiles` table.
///
/// The password hash never leaves the server.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new profile (registration).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Defaults to `client`; only admins may set another role.
    pub role: Option<String>,
}

/// Trainer entry for the admin's trainer picker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainerSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
}

/// One client row of the roster export, with their booking count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientRosterRow {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bookings_count: i64,
}
