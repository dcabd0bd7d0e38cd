//! Handlers for the `/reports` spreadsheet exports.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use gymbook_core::roles::ROLE_TRAINER;
use gymbook_db::models::training::TrainingWithDetails;
use gymbook_db::repositories::{ProfileRepo, TrainingRepo};

use crate::error::{AppError, AppResult};
use crate::export::xlsx::{build_workbook, Cell, Column};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn xlsx_response(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// GET /api/v1/reports/clients.xlsx
///
/// Client roster with booking counts.
pub async fn clients_xlsx(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let clients = ProfileRepo::clients_with_booking_counts(&state.pool).await?;

    let columns = [
        Column { header: "ID", width: 10 },
        Column { header: "First name", width: 20 },
        Column { header: "Last name", width: 20 },
        Column { header: "Email", width: 30 },
        Column { header: "Bookings", width: 12 },
    ];
    let rows: Vec<Vec<Cell>> = clients
        .into_iter()
        .map(|c| {
            vec![
                Cell::Int(c.id),
                Cell::Text(c.first_name),
                Cell::Text(c.last_name),
                Cell::Text(c.email),
                Cell::Int(c.bookings_count),
            ]
        })
        .collect();

    let bytes = build_workbook("Clients", &columns, &rows)
        .map_err(|e| AppError::InternalError(format!("Spreadsheet generation error: {e}")))?;

    Ok(xlsx_response("clients.xlsx", bytes))
}

/// GET /api/v1/reports/trainer-hours.xlsx
///
/// Weekly hours per training with a total row. Trainers get their own
/// sessions; admins get the whole schedule.
pub async fn trainer_hours_xlsx(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let trainings: Vec<TrainingWithDetails> = if user.role == ROLE_TRAINER {
        TrainingRepo::list_for_trainer(&state.pool, user.user_id).await?
    } else {
        TrainingRepo::list_with_details(&state.pool).await?
    };

    let columns = [
        Column { header: "Trainer", width: 25 },
        Column { header: "Training", width: 25 },
        Column { header: "Day", width: 12 },
        Column { header: "Start", width: 10 },
        Column { header: "End", width: 10 },
        Column { header: "Hours", width: 10 },
    ];

    let mut total_minutes: i64 = 0;
    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(trainings.len() + 1);
    for t in &trainings {
        total_minutes += i64::from(t.duration_min);
        rows.push(vec![
            Cell::Text(format!("{} {}", t.trainer_first_name, t.trainer_last_name)),
            Cell::Text(t.name.clone()),
            Cell::Text(t.day_of_week.clone()),
            Cell::Text(t.time_of_day.format("%H:%M").to_string()),
            Cell::Text(t.end_time.format("%H:%M").to_string()),
            Cell::Float(hours(i64::from(t.duration_min))),
        ]);
    }
    rows.push(vec![
        Cell::Text("Total".into()),
        Cell::Text(String::new()),
        Cell::Text(String::new()),
        Cell::Text(String::new()),
        Cell::Text(String::new()),
        Cell::Float(hours(total_minutes)),
    ]);

    let bytes = build_workbook("Trainer hours", &columns, &rows)
        .map_err(|e| AppError::InternalError(format!("Spreadsheet generation error: {e}")))?;

    Ok(xlsx_response("trainer-hours.xlsx", bytes))
}

/// Minutes to hours, rounded to two decimals for the report cells.
fn hours(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}
