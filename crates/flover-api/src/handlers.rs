//! # Request Handlers
//!
//! Axum request handlers for the checkout API. Every response body carries
//! an `ok` flag the frontend branches on; error bodies are always
//! `{ok: false, error: string}`.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use flover_core::{CheckoutError, OrderRequest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Successful checkout creation response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    pub ok: bool,
    /// Hosted checkout URL (redirect user here)
    pub url: String,
}

/// Query parameters for session lookup
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    /// Gateway session ID; absent param behaves like an empty one
    #[serde(default)]
    pub id: String,
}

/// Successful session lookup response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    /// Backlink ID from metadata (empty unless populated downstream)
    pub id: String,
    /// Metadata stored at session creation
    pub metadata: HashMap<String, String>,
    /// Total in major currency units
    pub amount_total: f64,
    /// Gateway payment status, verbatim
    pub payment_status: String,
}

/// Error response, shared by every failure path
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint: 204, empty body
pub async fn health() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Create a checkout session and return its redirect URL.
///
/// The body is parsed leniently: an absent or unreadable body behaves like
/// an empty order and fails validation with the same `"missing fields"`
/// error the frontend matches on.
#[instrument(skip(state, body))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateCheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let order: OrderRequest = serde_json::from_slice(&body).unwrap_or_default();

    let session = state
        .service
        .create_checkout_session(&order)
        .await
        .map_err(|e| {
            error!("checkout error: {}", e);
            checkout_error_to_response(e)
        })?;

    Ok(Json(CreateCheckoutResponse {
        ok: true,
        url: session.url,
    }))
}

/// Read a session's metadata and payment status back for the frontend.
#[instrument(skip(state), fields(id = %query.id))]
pub async fn get_session(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let view = state.service.lookup_session(&query.id).await.map_err(|e| {
        error!("session error: {}", e);
        checkout_error_to_response(e)
    })?;

    Ok(Json(SessionResponse {
        ok: true,
        id: view.id,
        metadata: view.metadata,
        amount_total: view.amount_total,
        payment_status: view.payment_status,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let err = ErrorResponse::new("missing fields");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ok": false, "error": "missing fields"})
        );
    }

    #[test]
    fn test_checkout_error_mapping() {
        let (status, _body) =
            checkout_error_to_response(CheckoutError::validation("missing fields"));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            checkout_error_to_response(CheckoutError::gateway("card declined"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "card declined");
    }

    #[test]
    fn test_session_query_defaults_to_empty_id() {
        let query: SessionQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.id, "");
    }
}
