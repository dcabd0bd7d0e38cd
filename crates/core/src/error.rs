use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// End time is not strictly after the start time. Detected before any
    /// collision check runs -- an input error, not a scheduling conflict.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A room or training still has dependent records blocking deletion.
    #[error("Resource in use: {0}")]
    ResourceInUse(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
