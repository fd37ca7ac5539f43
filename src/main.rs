use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ascendia_backend::handlers::{admin, auth, essays, health, upload};
use ascendia_backend::services::{
    credential_store::CredentialStore, essay_store::EssayStore, session_manager::SessionManager,
    upload_storage::UploadStorage, upload_store::UploadStore,
};
use ascendia_backend::utils::config::AppConfig;
use ascendia_backend::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ascendia_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ascendia backend");

    // Load configuration
    let config = AppConfig::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    if config.uses_default_secret() {
        tracing::warn!("SESSION_SECRET not set, using the insecure built-in default");
    }

    // Initialize the uploads area
    let storage = UploadStorage::new(&config.uploads_dir).map_err(|e| {
        tracing::error!("Failed to initialize upload storage: {}", e);
        e
    })?;

    // Create shared state
    let app_state = AppState {
        config: Arc::new(config.clone()),
        credentials: Arc::new(CredentialStore::new()),
        sessions: Arc::new(SessionManager::new()),
        essays: Arc::new(EssayStore::new()),
        uploads: Arc::new(UploadStore::new()),
        storage: Arc::new(storage),
    };

    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    // Build the application router
    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        // Auth endpoints
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        // Essay endpoints
        .route("/submit-essay", post(essays::submit_essay))
        .route("/essays", get(essays::list_essays))
        // File upload endpoints
        .route("/upload-essay", post(upload::upload_essay))
        .route("/admin/files", get(admin::list_files))
        // Serve uploaded files
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        // Add shared state
        .with_state(app_state)
        // Add middleware layers
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_seconds,
                )))
                .layer(cors),
        );

    // Parse the bind address
    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    // Create the server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
