// Web server: Axum JSON API consumed by the comparison front-end.
//
// Every route lives under /api. Failures use one body shape:
//   { "success": false, "error": "<message>" }
// so the front-end can show the message without caring which route failed.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::FundRepository;
use crate::config::Config;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub funds: Arc<FundRepository>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, funds: Arc<FundRepository>) -> Result<()> {
    let app = build_router(AppState { funds }, config.max_upload_bytes);

    let addr = format!("{}:{}", config.bind, config.port);
    info!("fundlens API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    let api = Router::new()
        .route("/api/health", get(health))
        .route("/api/storage/info", get(handlers::storage::storage_info))
        .route("/api/funds", get(handlers::funds::list_funds))
        .route(
            "/api/fund/{id}",
            get(handlers::funds::get_fund).delete(handlers::funds::delete_fund),
        )
        .route("/api/compare", post(handlers::compare::compare_funds))
        .route(
            "/api/upload",
            post(handlers::upload::upload_fund).layer(DefaultBodyLimit::max(max_upload_bytes)),
        );

    api.layer(
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE]),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Liveness probe that also reports the storage backend.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "status": "healthy",
            "message": "fundlens API is running",
            "storage": state.funds.storage_info(),
        })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        axum::Json(serde_json::json!({ "success": false, "error": message })),
    )
        .into_response()
}
