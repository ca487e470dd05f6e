use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sunshine_catalog::{
    InventoryCategory, InventoryFilter, InventoryItem, InventoryStats, InventoryTransaction, NewInventoryItem,
};
use sunshine_core::inventory;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::StaffClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/staff/inventory", get(list_inventory).post(create_item))
        .route("/v1/staff/inventory/categories", get(list_categories))
        .route("/v1/staff/inventory/stats", get(inventory_stats))
        .route("/v1/staff/inventory/{id}/restock", post(restock))
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RestockResponse {
    pub item: InventoryItem,
    pub transaction: InventoryTransaction,
}

/// GET /v1/staff/inventory?search=&category=&status=
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(filter): Query<InventoryFilter>,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    let items = inventory::list_items(state.inventory_repo.as_ref(), &filter).await?;
    Ok(Json(items))
}

/// POST /v1/staff/inventory
pub async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<NewInventoryItem>,
) -> Result<(StatusCode, Json<InventoryItem>), AppError> {
    let item = inventory::add_item(state.inventory_repo.as_ref(), req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /v1/staff/inventory/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<InventoryCategory>>, AppError> {
    let categories = state
        .inventory_repo
        .list_categories()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(categories))
}

/// GET /v1/staff/inventory/stats
pub async fn inventory_stats(State(state): State<AppState>) -> Result<Json<InventoryStats>, AppError> {
    Ok(Json(inventory::stats(state.inventory_repo.as_ref()).await?))
}

/// POST /v1/staff/inventory/{id}/restock
/// The acting staff member is recorded on the audit entry.
pub async fn restock(
    State(state): State<AppState>,
    Extension(claims): Extension<StaffClaims>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<RestockRequest>,
) -> Result<Json<RestockResponse>, AppError> {
    let (item, transaction) = inventory::restock_item(
        state.inventory_repo.as_ref(),
        item_id,
        req.quantity,
        Some(claims.sub),
        req.notes,
        Utc::now(),
    )
    .await?;

    Ok(Json(RestockResponse { item, transaction }))
}
