use crate::models::errors::AppError;
use crate::AppState;
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;

/// Cookie name correlating clients to server-side sessions
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login guard: resolves the session cookie to an authenticated user id.
///
/// Handlers taking this extractor reject anonymous requests with 401 before
/// the handler body runs; authenticated ones receive the resolved user id
/// explicitly instead of reading ambient request state.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: String,
    pub session_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session_id = session_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

        let user_id = state
            .sessions
            .resolve(&session_id)
            .await
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

        Ok(Self { user_id, session_id })
    }
}

/// Extracts the session token from the Cookie header, if any
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .filter_map(|c| c.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
}

fn session_cookie(session_id: &str) -> String {
    format!("{}={}; HttpOnly; SameSite=Lax; Path=/", SESSION_COOKIE, session_id)
}

fn clear_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

/// POST /signup - register a new user and start a session
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (email, password) = match (req.email.as_deref(), req.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(AppError::validation_failed("Email and password required")),
    };

    let user_id = state.credentials.create_user(email, password).await?;
    let session_id = state.sessions.create_session(&user_id).await;

    tracing::info!("New user registered: {}", email);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&session_id))],
        Json(json!({
            "message": "User created",
            "userId": user_id
        })),
    ))
}

/// POST /login - authenticate and start a session
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user_id = state
        .credentials
        .verify_credentials(&email, &password)
        .await
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    let session_id = state.sessions.create_session(&user_id).await;

    tracing::debug!("User logged in: {}", email);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&session_id))],
        Json(json!({ "message": "Logged in" })),
    ))
}

/// POST /logout - destroy the server-side session and clear the cookie.
/// Succeeds whether or not a session was presented.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(session_id) = session_token(&headers) {
        state.sessions.destroy_session(&session_id).await;
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "message": "Logged out" })),
    )
}
