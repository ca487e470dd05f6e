use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sunshine_order::{CheckoutSummary, PaymentDetails, QrPayload, Receipt};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/checkout", post(open_checkout))
        .route("/v1/checkout/{id}", get(get_checkout).delete(close_checkout))
        .route("/v1/checkout/{id}/tickets", post(adjust_tickets))
        .route("/v1/checkout/{id}/visit", put(update_visit))
        .route("/v1/checkout/{id}/advance", post(advance))
        .route("/v1/checkout/{id}/back", post(back))
        .route("/v1/checkout/{id}/payment", post(pay))
        .route("/v1/checkout/{id}/receipt", get(download_receipt))
        .route("/v1/checkout/{id}/qr", get(qr_code))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub summary: CheckoutSummary,
}

#[derive(Debug, Deserialize)]
pub struct AdjustTicketsRequest {
    pub ticket_id: String,
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct VisitDetailsRequest {
    pub visit_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QrResponse {
    /// Text to rasterise into the entrance code
    pub value: String,
    pub payload: QrPayload,
}

fn response(session_id: Uuid, summary: CheckoutSummary) -> Json<CheckoutResponse> {
    Json(CheckoutResponse { session_id, summary })
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/checkout
pub async fn open_checkout(State(state): State<AppState>) -> (StatusCode, Json<CheckoutResponse>) {
    let (id, flow) = state.sessions.open(state.catalog.clone(), state.max_tickets_per_type).await;
    (StatusCode::CREATED, response(id, flow.summary()))
}

/// GET /v1/checkout/{id}
pub async fn get_checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let summary = state.sessions.read(id, |flow| Ok(flow.summary())).await?;
    Ok(response(id, summary))
}

/// DELETE /v1/checkout/{id}
/// Guest navigated away; everything entered is discarded.
pub async fn close_checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.close(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("Checkout session {} not found", id)))
    }
}

/// POST /v1/checkout/{id}/tickets
pub async fn adjust_tickets(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AdjustTicketsRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let summary = state
        .sessions
        .update(id, |flow| {
            flow.adjust_quantity(&req.ticket_id, req.delta)?;
            Ok(flow.summary())
        })
        .await?;
    Ok(response(id, summary))
}

/// PUT /v1/checkout/{id}/visit
/// Visit date and contact details. Omitted fields keep their value.
pub async fn update_visit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<VisitDetailsRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let today = Local::now().date_naive();
    let summary = state
        .sessions
        .update(id, |flow| {
            // Date first: a rejected date must leave the contact untouched
            if let Some(date) = req.visit_date {
                flow.set_visit_date(date, today)?;
            }
            flow.set_contact(req.email, req.phone)?;
            Ok(flow.summary())
        })
        .await?;
    Ok(response(id, summary))
}

/// POST /v1/checkout/{id}/advance
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let summary = state
        .sessions
        .update(id, |flow| {
            flow.advance_to_payment()?;
            Ok(flow.summary())
        })
        .await?;
    Ok(response(id, summary))
}

/// POST /v1/checkout/{id}/back
pub async fn back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let summary = state
        .sessions
        .update(id, |flow| {
            flow.back_to_selection()?;
            Ok(flow.summary())
        })
        .await?;
    Ok(response(id, summary))
}

/// POST /v1/checkout/{id}/payment
pub async fn pay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payment): Json<PaymentDetails>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let summary = state
        .sessions
        .update(id, |flow| {
            flow.complete_payment(&payment, Utc::now())?;
            Ok(flow.summary())
        })
        .await?;
    Ok(response(id, summary))
}

/// GET /v1/checkout/{id}/receipt
/// JSON receipt served as a file download
pub async fn download_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let receipt = state.sessions.read(id, |flow| flow.receipt()).await?;
    let disposition = format!("attachment; filename=\"{}\"", receipt.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, Receipt::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        receipt.body,
    ))
}

/// GET /v1/checkout/{id}/qr
pub async fn qr_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QrResponse>, AppError> {
    let payload = state.sessions.read(id, |flow| flow.qr_payload()).await?;
    let value = payload
        .encode()
        .map_err(|e| AppError::InternalServerError(format!("QR payload encoding failed: {}", e)))?;
    Ok(Json(QrResponse { value, payload }))
}
