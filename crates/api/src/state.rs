use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is an `Arc` internally and the config is
/// wrapped in one. Note there is deliberately no schedule cache here; every
/// availability check reads the persisted state (see the exclusion
/// constraint in the trainings migration for the concurrency backstop).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gymbook_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
