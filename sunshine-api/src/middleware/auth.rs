use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub const STAFF_ROLES: [&str; 2] = ["STAFF", "MANAGER"];

// ============================================================================
// JWT Claims
// ============================================================================

/// Claims issued by the identity provider for back-office users
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StaffClaims {
    pub sub: String,
    pub email: Option<String>,
    pub role: String,
    pub exp: usize,
}

impl StaffClaims {
    pub fn new(sub: &str, email: Option<&str>, role: &str, ttl: Duration) -> Self {
        Self {
            sub: sub.to_string(),
            email: email.map(str::to_string),
            role: role.to_string(),
            exp: (Utc::now() + ttl).timestamp() as usize,
        }
    }

    pub fn encode(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), self, &EncodingKey::from_secret(secret.as_bytes()))
    }
}

// ============================================================================
// Staff Authentication Middleware
// ============================================================================

/// Gate in front of every staff route. No session means 401.
pub async fn staff_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract token from Authorization header
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Decode and validate JWT
    let token_data = decode::<StaffClaims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Rejected staff token: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    // 3. Check role
    if !STAFF_ROLES.contains(&token_data.claims.role.as_str()) {
        return Err(StatusCode::FORBIDDEN);
    }

    // 4. Inject claims
    req.extensions_mut().insert(token_data.claims);

    Ok(next.run(req).await)
}
