//! Handlers for `/users/me` profile self-service.

use axum::extract::State;
use axum::Json;
use gymbook_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, MIN_PASSWORD_LEN};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateEmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// PUT /api/v1/users/me/email
pub async fn update_email(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateEmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = input.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email is required".into(),
        )));
    }

    let updated =
        gymbook_db::repositories::ProfileRepo::update_email(&state.pool, user.user_id, email)
            .await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }));
    }

    Ok(Json(MessageResponse {
        message: "Email updated",
    }))
}

/// PUT /api/v1/users/me/password
pub async fn update_password(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdatePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = gymbook_db::repositories::ProfileRepo::update_password(
        &state.pool,
        user.user_id,
        &password_hash,
    )
    .await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }));
    }

    Ok(Json(MessageResponse {
        message: "Password updated",
    }))
}
