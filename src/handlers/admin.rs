use crate::models::records::UploadedEssay;
use crate::AppState;
use axum::{extract::State, response::Json};

/// GET /admin/files - full uploaded essay sequence.
/// Ungated like the deployed version; an admin check here is a recorded
/// open question.
pub async fn list_files(State(state): State<AppState>) -> Json<Vec<UploadedEssay>> {
    Json(state.uploads.list().await)
}
