//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the requirement, enforcing authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use gymbook_core::error::CoreError;
use gymbook_core::roles::{ROLE_ADMIN, ROLE_CLIENT, ROLE_TRAINER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `trainer` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_TRAINER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Trainer or Admin role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}

/// Requires the `client` role. Rejects with 403 Forbidden otherwise.
///
/// Bookings belong to clients; staff manage the schedule through the admin
/// routes instead of booking themselves in.
pub struct RequireClient(pub AuthUser);

impl FromRequestParts<AppState> for RequireClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_CLIENT {
            return Err(AppError::Core(CoreError::Forbidden(
                "Client role required".into(),
            )));
        }
        Ok(RequireClient(user))
    }
}
