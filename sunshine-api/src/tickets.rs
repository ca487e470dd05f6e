use axum::{extract::State, routing::get, Json, Router};
use sunshine_catalog::{Promotion, TicketType};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", get(list_tickets))
        .route("/v1/promotions", get(list_promotions))
}

/// GET /v1/tickets
pub async fn list_tickets(State(state): State<AppState>) -> Json<Vec<TicketType>> {
    Json(state.catalog.tickets().to_vec())
}

/// GET /v1/promotions
/// Display only; promotions never touch cart totals.
pub async fn list_promotions(State(state): State<AppState>) -> Json<Vec<Promotion>> {
    Json(state.promotions.as_ref().clone())
}
