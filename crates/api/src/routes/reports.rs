//! Route definitions for the `/reports` spreadsheet exports.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /clients.xlsx       -> clients_xlsx
/// GET /trainer-hours.xlsx -> trainer_hours_xlsx
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients.xlsx", get(reports::clients_xlsx))
        .route("/trainer-hours.xlsx", get(reports::trainer_hours_xlsx))
}
