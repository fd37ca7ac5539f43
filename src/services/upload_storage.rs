use std::{
    fs,
    path::{Path, PathBuf},
};
use tokio::fs as async_fs;
use uuid::Uuid;
use crate::models::errors::AppError;

/// Filesystem area for uploaded essay files. Files are written once under a
/// server-generated name and served back verbatim by the static route.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    uploads_dir: PathBuf,
}

impl UploadStorage {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let uploads_dir = uploads_dir.into();

        // Create the uploads directory if it doesn't exist
        if !uploads_dir.exists() {
            fs::create_dir_all(&uploads_dir)
                .map_err(|e| AppError::storage_failed(format!("Failed to create uploads directory: {}", e)))?;
        }

        Ok(Self { uploads_dir })
    }

    /// Persist uploaded bytes under a UUID-based name, keeping the original
    /// file's extension when it has a safe one. Returns the stored name.
    pub async fn store_upload(&self, data: &[u8], original_name: &str) -> Result<String, AppError> {
        let file_id = Uuid::new_v4().to_string();
        let stored_name = match safe_extension(original_name) {
            Some(ext) => format!("{}.{}", file_id, ext),
            None => file_id,
        };
        let file_path = self.uploads_dir.join(&stored_name);

        async_fs::write(&file_path, data)
            .await
            .map_err(|e| AppError::storage_failed(format!("Failed to write uploaded file: {}", e)))?;

        tracing::debug!("Stored uploaded file: {}", stored_name);
        Ok(stored_name)
    }

    /// Get the full path for a stored file
    pub fn file_path(&self, stored_name: &str) -> PathBuf {
        self.uploads_dir.join(stored_name)
    }

    /// Check if a stored file exists
    pub fn file_exists(&self, stored_name: &str) -> bool {
        self.file_path(stored_name).exists()
    }

    /// Get the uploads directory path
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }
}

/// Extracts a filename extension usable in a server-generated name. Anything
/// other than short alphanumeric extensions is dropped.
fn safe_extension(original_name: &str) -> Option<String> {
    let ext = Path::new(original_name).extension()?.to_str()?;

    if !ext.is_empty()
        && ext.len() <= 10
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        Some(ext.to_ascii_lowercase())
    } else {
        None
    }
}
