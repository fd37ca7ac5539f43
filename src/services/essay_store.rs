use crate::models::records::Essay;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Append-only in-memory essay sequence, kept in submission order.
/// Unbounded growth is accepted for the lifetime of the process.
#[derive(Clone, Default)]
pub struct EssayStore {
    essays: Arc<RwLock<Vec<Essay>>>,
}

impl EssayStore {
    pub fn new() -> Self {
        Self {
            essays: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Appends an essay for the given user, stamped with the current time
    pub async fn append(&self, user_id: &str, essay_text: String) {
        let mut essays = self.essays.write().await;
        essays.push(Essay {
            user_id: user_id.to_string(),
            essay_text,
            submitted_at: Utc::now(),
        });
    }

    /// Returns a snapshot of all essays in submission order
    pub async fn list(&self) -> Vec<Essay> {
        let essays = self.essays.read().await;
        essays.clone()
    }

    pub async fn len(&self) -> usize {
        let essays = self.essays.read().await;
        essays.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
