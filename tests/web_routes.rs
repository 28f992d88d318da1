// In-process tests for the HTTP API.
//
// The router is built with `web::build_router` over a LocalStorage in a
// per-test temp directory and driven with `tower::ServiceExt::oneshot`;
// no socket is bound.

#![cfg(feature = "web")]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use fundlens::catalog::FundRepository;
use fundlens::storage::LocalStorage;
use fundlens::web::{build_router, AppState};

const ALPHA_CSV: &str = "\
Company Name,% Portfolio Weight,Sector
Infosys,8.5%,IT
";

const BETA_CSV: &str = "\
Holding Name,% Portfolio,Sector
Infosys Ltd,6.2,IT
TCS,5.0,IT
";

const MAX_UPLOAD: usize = 1024 * 1024;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fundlens-web-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("alpha_fund.csv"), ALPHA_CSV).unwrap();
    std::fs::write(dir.join("beta_fund.csv"), BETA_CSV).unwrap();
    dir
}

fn make_router(dir: &PathBuf) -> axum::Router {
    let repo = FundRepository::new(Arc::new(LocalStorage::new(dir)));
    build_router(
        AppState {
            funds: Arc::new(repo),
        },
        MAX_UPLOAD,
    )
}

async fn call(router: axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_upload(filename: &str, content: &str) -> Request<Body> {
    let boundary = "fundlens-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"fund_name\"\r\n\r\n\
         Gamma\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{boundary}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// ============================================================
// GET /api/health, /api/storage/info, /api/funds
// ============================================================

#[tokio::test]
async fn health_reports_local_storage() {
    let dir = temp_dir("health");
    let (status, json) = call(make_router(&dir), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["storage"]["is_local"], true);

    let (status, json) = call(make_router(&dir), get("/api/storage/info")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["storage"]["storage_type"], "local");
}

#[tokio::test]
async fn list_funds_returns_ids_and_names() {
    let dir = temp_dir("list");
    let (status, json) = call(make_router(&dir), get("/api/funds")).await;
    assert_eq!(status, StatusCode::OK);

    let funds = json["funds"].as_array().unwrap();
    assert_eq!(funds.len(), 2);
    assert_eq!(funds[0]["id"], "alpha-fund");
    assert_eq!(funds[0]["name"], "Alpha Fund");
}

// ============================================================
// GET /api/fund/{id}
// ============================================================

#[tokio::test]
async fn fund_summary_found() {
    let dir = temp_dir("summary");
    let (status, json) = call(make_router(&dir), get("/api/fund/beta-fund")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["fund"]["total_stocks"], 2);
    assert_eq!(json["fund"]["top_holdings"][0]["company_name"], "Infosys Ltd");
    assert_eq!(json["fund"]["top_sectors"][0][0], "IT");
}

#[tokio::test]
async fn fund_summary_unknown_is_400() {
    let dir = temp_dir("summary-missing");
    let (status, json) = call(make_router(&dir), get("/api/fund/nope")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("nope"));
}

// ============================================================
// POST /api/compare
// ============================================================

#[tokio::test]
async fn compare_returns_overlap_and_summaries() {
    let dir = temp_dir("compare");
    let req = post_json(
        "/api/compare",
        serde_json::json!({ "fund1_id": "alpha-fund", "fund2_id": "beta-fund" }),
    );
    let (status, json) = call(make_router(&dir), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let overlap = &json["overlap"];
    assert_eq!(overlap["common_stocks_count"], 1);
    assert_eq!(overlap["overlap_percentage"], 50.0);
    assert_eq!(overlap["weighted_overlap"], 6.2);
    assert_eq!(overlap["diversification_score"], 50.0);
    assert_eq!(overlap["sector_overlap"]["IT"]["count"], 1);
    assert_eq!(overlap["sector_overlap"]["IT"]["fund1_weight"], 8.5);
    assert_eq!(overlap["sector_overlap"]["IT"]["fund2_weight"], 6.2);
    assert_eq!(overlap["common_stocks"][0]["company_name"], "Infosys");

    assert_eq!(json["fund1"]["name"], "Alpha Fund");
    assert_eq!(json["fund2"]["name"], "Beta Fund");
}

#[tokio::test]
async fn compare_missing_id_is_400() {
    let dir = temp_dir("compare-missing");
    let req = post_json("/api/compare", serde_json::json!({ "fund1_id": "alpha-fund" }));
    let (status, json) = call(make_router(&dir), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Both fund1_id and fund2_id are required");
}

#[tokio::test]
async fn compare_same_id_is_400() {
    let dir = temp_dir("compare-same");
    let req = post_json(
        "/api/compare",
        serde_json::json!({ "fund1_id": "alpha-fund", "fund2_id": "alpha-fund" }),
    );
    let (status, json) = call(make_router(&dir), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn compare_unknown_fund_is_500() {
    let dir = temp_dir("compare-unknown");
    let req = post_json(
        "/api/compare",
        serde_json::json!({ "fund1_id": "alpha-fund", "fund2_id": "ghost" }),
    );
    let (status, json) = call(make_router(&dir), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn compare_malformed_body_is_400() {
    let dir = temp_dir("compare-malformed");
    let req = Request::builder()
        .method("POST")
        .uri("/api/compare")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, json) = call(make_router(&dir), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

// ============================================================
// POST /api/upload, DELETE /api/fund/{id}
// ============================================================

#[tokio::test]
async fn upload_then_list_shows_new_fund() {
    let dir = temp_dir("upload");
    let router = make_router(&dir);

    let (status, json) = call(router.clone(), multipart_upload("gamma_fund.csv", BETA_CSV)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["success"], true);
    assert_eq!(json["filename"], "gamma_fund.csv");
    assert_eq!(json["message"], "Fund Gamma uploaded successfully");

    let (_, json) = call(router, get("/api/funds")).await;
    assert_eq!(json["funds"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn upload_rejects_non_csv() {
    let dir = temp_dir("upload-txt");
    let (status, json) = call(make_router(&dir), multipart_upload("notes.txt", BETA_CSV)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Only CSV files are allowed");
}

#[tokio::test]
async fn upload_without_multipart_body_is_json_400() {
    let dir = temp_dir("upload-json");
    let req = post_json("/api/upload", serde_json::json!({ "file": "x.csv" }));
    let (status, json) = call(make_router(&dir), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn upload_rejects_unknown_layout() {
    let dir = temp_dir("upload-layout");
    let (status, json) = call(
        make_router(&dir),
        multipart_upload("odd.csv", "Ticker,Weight\nTCS,1\n"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(!dir.join("odd.csv").exists());
}

#[tokio::test]
async fn delete_fund_removes_it() {
    let dir = temp_dir("delete");
    let router = make_router(&dir);

    let req = Request::builder()
        .method("DELETE")
        .uri("/api/fund/alpha-fund")
        .body(Body::empty())
        .unwrap();
    let (status, json) = call(router.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (status, _) = call(router, get("/api/fund/alpha-fund")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
