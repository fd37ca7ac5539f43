use crate::handlers::auth::AuthSession;
use crate::models::errors::AppError;
use crate::models::records::Essay;
use crate::AppState;
use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

/// Minimum essay length in characters after trimming surrounding whitespace
pub const MIN_ESSAY_CHARS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SubmitEssayRequest {
    pub essay: Option<String>,
}

/// POST /submit-essay - record a text essay for the authenticated user
pub async fn submit_essay(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(req): Json<SubmitEssayRequest>,
) -> Result<Json<Value>, AppError> {
    let essay = req.essay.unwrap_or_default();

    if essay.trim().chars().count() < MIN_ESSAY_CHARS {
        return Err(AppError::validation_failed("Essay text too short"));
    }

    state.essays.append(&auth.user_id, essay).await;

    tracing::info!("Essay submitted by user {}", auth.user_id);

    Ok(Json(json!({ "message": "Essay submitted for review" })))
}

/// GET /essays - full essay sequence in submission order.
/// Deliberately ungated, matching the deployed behavior; restricting this to
/// instructors is an open question.
pub async fn list_essays(State(state): State<AppState>) -> Json<Vec<Essay>> {
    Json(state.essays.list().await)
}
