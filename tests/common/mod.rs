use axum::{
    body::Body,
    http::{header, Request, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tempfile::TempDir;
use tower_http::services::ServeDir;

// Re-export the main app modules for testing
use ascendia_backend::{handlers, services, utils, AppState};

/// Setup a test application over a temporary uploads directory.
/// The TempDir is returned so uploaded files outlive router construction.
pub async fn setup_test_app() -> (Router, TempDir) {
    let uploads_dir = TempDir::new().unwrap();
    let uploads_path = uploads_dir.path().to_str().unwrap().to_string();

    // Create test configuration
    let config = utils::config::AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0, // Use random port for testing
        uploads_dir: uploads_path.clone(),
        session_secret: "test-secret".to_string(),
        cors_origins: vec!["*".to_string()],
        request_timeout_seconds: 30,
    };

    // Initialize services
    let storage = services::upload_storage::UploadStorage::new(&uploads_path)
        .expect("Failed to create upload storage");

    // Create app state
    let app_state = AppState {
        config: Arc::new(config),
        credentials: Arc::new(services::credential_store::CredentialStore::new()),
        sessions: Arc::new(services::session_manager::SessionManager::new()),
        essays: Arc::new(services::essay_store::EssayStore::new()),
        uploads: Arc::new(services::upload_store::UploadStore::new()),
        storage: Arc::new(storage),
    };

    // Build router (without middleware layers, matching the production routes)
    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/submit-essay", post(handlers::essays::submit_essay))
        .route("/essays", get(handlers::essays::list_essays))
        .route("/upload-essay", post(handlers::upload::upload_essay))
        .route("/admin/files", get(handlers::admin::list_files))
        .nest_service("/uploads", ServeDir::new(&uploads_path))
        .with_state(app_state);

    (app, uploads_dir)
}

/// Build a JSON POST request
pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Build a JSON POST request carrying a session cookie
pub fn post_json_with_cookie(uri: &str, body: &serde_json::Value, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Extract the `session=<token>` pair from a Set-Cookie response header
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("response should carry a session cookie")
        .to_string()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a multipart form body with an optional email text field and an
/// optional file field named `essay`
pub fn create_multipart_body(
    boundary: &str,
    email: Option<&str>,
    file: Option<(&str, &[u8])>,
) -> Vec<u8> {
    let mut body: Vec<u8> = Vec::new();

    if let Some(email) = email {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"email\"\r\n\r\n");
        body.extend_from_slice(email.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((filename, data)) = file {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"essay\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}
