//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use gymbook_core::error::CoreError;
use gymbook_core::roles::ROLE_CLIENT;
use gymbook_core::types::DbId;
use gymbook_db::models::profile::CreateProfile;
use gymbook_db::repositories::ProfileRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_LEN};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`] and register responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

/// POST /api/v1/auth/register
///
/// Public self-registration always creates a `client` profile. Trainer and
/// admin accounts are provisioned out of band, so a role field naming
/// anything else is rejected rather than silently downgraded.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateProfile>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    if input.email.trim().is_empty() || !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email is required".into(),
        )));
    }
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "First and last name are required".into(),
        )));
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        ))));
    }
    if let Some(role) = &input.role {
        if role != ROLE_CLIENT {
            return Err(AppError::Core(CoreError::Forbidden(
                "Self-registration is limited to client accounts".into(),
            )));
        }
    }

    if ProfileRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let profile = ProfileRepo::create(
        &state.pool,
        input.email.trim(),
        &password_hash,
        ROLE_CLIENT,
        input.first_name.trim(),
        input.last_name.trim(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserInfo {
            id: profile.id,
            email: profile.email,
            role: profile.role,
            first_name: profile.first_name,
            last_name: profile.last_name,
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns a bearer access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let profile = ProfileRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &profile.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let access_token = generate_access_token(profile.id, &profile.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: profile.id,
            email: profile.email,
            role: profile.role,
            first_name: profile.first_name,
            last_name: profile.last_name,
        },
    }))
}
