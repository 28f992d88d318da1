// GET /api/storage/info: which backend holds the fund files.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::web::AppState;

pub async fn storage_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "storage": state.funds.storage_info(),
    }))
}
