// Library exports for testing and external use

pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<utils::config::AppConfig>,
    pub credentials: Arc<services::credential_store::CredentialStore>,
    pub sessions: Arc<services::session_manager::SessionManager>,
    pub essays: Arc<services::essay_store::EssayStore>,
    pub uploads: Arc<services::upload_store::UploadStore>,
    pub storage: Arc<services::upload_storage::UploadStorage>,
}
