// POST /api/upload: add a fund CSV to storage.
//
// Multipart form fields:
//   file       the CSV export (required, must end in .csv)
//   fund_name  display name for the success message (optional)
//
// A successful upload clears the fund cache so the next list/compare
// sees the new file.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use crate::catalog::FundError;
use crate::web::{api_error, AppState};

struct UploadForm {
    filename: String,
    content: Vec<u8>,
    fund_name: Option<String>,
}

pub async fn upload_fund(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(message) => return api_error(StatusCode::BAD_REQUEST, &message),
    };

    let fund_name = form
        .fund_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| form.filename.trim_end_matches(".csv").to_string());

    match state.funds.upload(&form.filename, &form.content).await {
        Ok(entry) => Json(serde_json::json!({
            "success": true,
            "message": format!("Fund {fund_name} uploaded successfully"),
            "filename": entry.file,
            "fund": entry,
            "uploaded_at": Utc::now().to_rfc3339(),
        }))
        .into_response(),
        Err(FundError::InvalidUpload(message)) => api_error(StatusCode::BAD_REQUEST, &message),
        Err(e) => {
            tracing::error!(error = %e, filename = %form.filename, "Upload failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to upload file")
        }
    }
}

/// Pull the file and optional fund name out of the form.
/// Errors are user-facing messages for a 400 response.
async fn read_form(mut multipart: Multipart) -> Result<UploadForm, String> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut fund_name = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| e.body_text())?;
                file = Some((filename, bytes.to_vec()));
            }
            Some("fund_name") => {
                fund_name = Some(field.text().await.map_err(|e| e.body_text())?);
            }
            _ => {}
        }
    }

    let (filename, content) = file.ok_or_else(|| "No file provided".to_string())?;
    if filename.is_empty() {
        return Err("No file selected".to_string());
    }
    if !filename.ends_with(".csv") {
        return Err("Only CSV files are allowed".to_string());
    }

    Ok(UploadForm {
        filename,
        content,
        fund_name,
    })
}
