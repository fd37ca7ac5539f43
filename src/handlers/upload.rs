use crate::models::errors::AppError;
use crate::models::records::UploadedEssay;
use crate::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    response::Json,
};
use chrono::Utc;
use futures_util::TryStreamExt;
use multer::Multipart;
use serde_json::{json, Value};

/// Handle multipart essay file upload.
///
/// Expects an `essay` file field plus a client-supplied `email` text field.
/// The email is taken as-is without verifying it against any registered
/// user, and the endpoint is not session-gated; both are recorded open
/// questions rather than behavior to change here.
pub async fn upload_essay(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Json<Value>, AppError> {
    let boundary = request
        .headers()
        .get("content-type")
        .and_then(|ct| ct.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| AppError::validation_failed("Missing or invalid multipart boundary"))?;

    // Convert the request body to a stream
    let stream = request
        .into_body()
        .into_data_stream()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err));

    let mut multipart = Multipart::new(stream, boundary);
    let mut email: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        AppError::validation_failed(format!("Failed to parse uploaded file: {}", e))
    })? {
        let name = field
            .name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let filename = field.file_name().map(|s| s.to_string());

        tracing::debug!("Processing field: {} (filename: {:?})", name, filename);

        if name == "email" && filename.is_none() {
            let value = field.text().await.map_err(|e| {
                AppError::validation_failed(format!("Failed to read email field: {}", e))
            })?;
            email = Some(value);
        } else if let Some(original_name) = filename {
            let data = field.bytes().await.map_err(|e| {
                tracing::error!("Failed to read file data: {}", e);
                AppError::validation_failed(format!("Failed to read file data: {}", e))
            })?;
            file = Some((original_name, data.to_vec()));
        }
    }

    let Some((original_name, data)) = file else {
        return Err(AppError::validation_failed("No file uploaded"));
    };

    let stored_name = state.storage.store_upload(&data, &original_name).await?;
    let url = format!("/uploads/{}", stored_name);

    state
        .uploads
        .append(UploadedEssay {
            email: email.unwrap_or_default(),
            original_name: original_name.clone(),
            stored_name: stored_name.clone(),
            url: url.clone(),
            timestamp: Utc::now(),
        })
        .await;

    tracing::info!(
        "Uploaded essay file {} as {} ({} bytes)",
        original_name,
        stored_name,
        data.len()
    );

    Ok(Json(json!({
        "message": "Essay uploaded",
        "url": url
    })))
}
