use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use sunshine_core::analytics::{self, AnalyticsReport, DEFAULT_WINDOW_DAYS};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/staff/analytics", get(get_analytics))
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<i64>,
}

/// GET /v1/staff/analytics?days=
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    if days <= 0 {
        return Err(AppError::ValidationError("days must be positive".to_string()));
    }

    let since = analytics::window_start(Local::now().date_naive(), days)
        .ok_or_else(|| AppError::ValidationError(format!("days {} is out of range", days)))?;
    let records = state
        .analytics_repo
        .list_daily(since)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(analytics::report(since, &records)))
}
