use crate::models::records::UploadedEssay;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Append-only in-memory record of file-based essay submissions. Only the
/// metadata lives here; the bytes are on disk under the uploads directory.
#[derive(Clone, Default)]
pub struct UploadStore {
    records: Arc<RwLock<Vec<UploadedEssay>>>,
}

impl UploadStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn append(&self, record: UploadedEssay) {
        let mut records = self.records.write().await;
        records.push(record);
    }

    /// Returns a snapshot of all upload records in arrival order
    pub async fn list(&self) -> Vec<UploadedEssay> {
        let records = self.records.read().await;
        records.clone()
    }

    pub async fn len(&self) -> usize {
        let records = self.records.read().await;
        records.len()
    }
}
