use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered user credentials. Never mutated or deleted after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    pub password_hash: String,
}

/// A text essay submission bound to an authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Essay {
    pub user_id: String,
    pub essay_text: String,
    pub submitted_at: DateTime<Utc>,
}

/// Metadata for a file-based essay submission. The email is client-supplied
/// and unverified; the upload endpoint is deliberately not session-gated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedEssay {
    pub email: String,
    pub original_name: String,
    pub stored_name: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}
