// POST /api/compare: overlap analysis of two funds.
//
// Body: { "fund1_id": "...", "fund2_id": "..." }
//
// Returns 400 when an id is missing or both ids are the same, and 500 for
// anything that goes wrong loading or comparing (including unknown ids).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct CompareRequest {
    pub fund1_id: Option<String>,
    pub fund2_id: Option<String>,
}

pub async fn compare_funds(
    State(state): State<AppState>,
    body: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let fund1_id = request.fund1_id.unwrap_or_default();
    let fund2_id = request.fund2_id.unwrap_or_default();

    if fund1_id.is_empty() || fund2_id.is_empty() {
        return api_error(
            StatusCode::BAD_REQUEST,
            "Both fund1_id and fund2_id are required",
        );
    }
    if fund1_id == fund2_id {
        return api_error(StatusCode::BAD_REQUEST, "Cannot compare a fund with itself");
    }

    match state.funds.compare(&fund1_id, &fund2_id).await {
        Ok(comparison) => Json(serde_json::json!({
            "success": true,
            "overlap": comparison.overlap,
            "fund1": comparison.fund1,
            "fund2": comparison.fund2,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, %fund1_id, %fund2_id, "Comparison failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}
