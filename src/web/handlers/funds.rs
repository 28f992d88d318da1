// Fund list and detail handlers.
//
// GET    /api/funds      every fund discovered in storage
// GET    /api/fund/{id}  one fund's summary
// DELETE /api/fund/{id}  remove a fund file
//
// Unknown ids answer 400 rather than 404; the front-end treats any
// `success: false` body the same way.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::web::{api_error, AppState};

/// GET /api/funds: list available funds and the active storage backend.
pub async fn list_funds(State(state): State<AppState>) -> Response {
    match state.funds.list_funds().await {
        Ok(funds) => Json(serde_json::json!({
            "funds": funds,
            "storage": state.funds.storage_info(),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list funds");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

/// GET /api/fund/{id}: summary of a single fund.
pub async fn get_fund(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.funds.summary(&id).await {
        Ok(summary) => Json(serde_json::json!({
            "success": true,
            "fund": summary,
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, fund_id = %id, "Fund lookup failed");
            api_error(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

/// DELETE /api/fund/{id}: remove the fund's file from storage.
pub async fn delete_fund(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.funds.delete(&id).await {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": format!("Fund {id} deleted"),
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, fund_id = %id, "Fund delete failed");
            api_error(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}
