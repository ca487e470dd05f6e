use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sunshine_core::CoreError;
use sunshine_core::schedule::{self, CalendarDay, NewShift, Shift, LOCATIONS, POSITIONS, UPCOMING_WINDOW_DAYS};

use crate::error::AppError;
use crate::middleware::StaffClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/staff/schedule", get(get_schedule).post(create_shift))
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    #[serde(default)]
    pub week_offset: i64,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub week_offset: i64,
    pub week_start: NaiveDate,
    pub days: Vec<CalendarDay>,
    /// Today through the next 30 days, by date then start time
    pub upcoming: Vec<Shift>,
    pub positions: &'static [&'static str],
    pub locations: &'static [&'static str],
}

fn persistence(e: impl std::fmt::Display) -> AppError {
    AppError::InternalServerError(e.to_string())
}

/// GET /v1/staff/schedule?week_offset=
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let today = Local::now().date_naive();
    let days = schedule::week_days(today, query.week_offset).map_err(CoreError::from)?;
    let window_end = today + Duration::days(UPCOMING_WINDOW_DAYS);

    let upcoming = state.schedule_repo.list_shifts(today, window_end).await.map_err(persistence)?;

    // The displayed week may reach into the past, so it gets its own query
    let week_shifts = state
        .schedule_repo
        .list_shifts(days[0], days[6])
        .await
        .map_err(persistence)?;

    Ok(Json(ScheduleResponse {
        week_offset: query.week_offset,
        week_start: days[0],
        days: schedule::week_calendar(&week_shifts, days, today),
        upcoming,
        positions: &POSITIONS,
        locations: &LOCATIONS,
    }))
}

/// POST /v1/staff/schedule
/// Shifts are created for the signed-in staff member.
pub async fn create_shift(
    State(state): State<AppState>,
    Extension(claims): Extension<StaffClaims>,
    Json(req): Json<NewShift>,
) -> Result<(StatusCode, Json<Shift>), AppError> {
    let today = Local::now().date_naive();
    let shift = req.into_shift(&claims.sub, today).map_err(CoreError::from)?;

    state.schedule_repo.create_shift(&shift).await.map_err(|e| {
        tracing::error!("Error adding shift: {}", e);
        persistence(e)
    })?;

    tracing::info!(shift_id = %shift.id, date = %shift.shift_date, "shift scheduled");
    Ok((StatusCode::CREATED, Json(shift)))
}
