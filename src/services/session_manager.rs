use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session data stored for each authenticated client
#[derive(Debug, Clone)]
pub struct SessionData {
    pub session_id: String,
    pub user_id: String,
    pub created_at: SystemTime,
}

impl SessionData {
    fn new(user_id: String) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id,
            created_at: SystemTime::now(),
        }
    }

    /// Checks if the session has outlived the given duration
    pub fn is_expired(&self, expiry_duration: Duration) -> bool {
        match self.created_at.elapsed() {
            Ok(elapsed) => elapsed > expiry_duration,
            Err(_) => true,
        }
    }
}

/// Server-side session store correlating opaque tokens to user ids.
///
/// A request presenting no token, an unknown token, or an expired token is
/// anonymous; there is no other client state.
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
    // None means sessions live for the process lifetime.
    expiry_duration: Option<Duration>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            expiry_duration: None,
        }
    }

    /// Creates a new SessionManager whose sessions expire after the given
    /// duration
    pub fn with_expiry(expiry_duration: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            expiry_duration: Some(expiry_duration),
        }
    }

    /// Binds a fresh session token to a user id and returns the token
    pub async fn create_session(&self, user_id: &str) -> String {
        let session = SessionData::new(user_id.to_string());
        let session_id = session.session_id.clone();

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), session);

        tracing::debug!("Created session {} for user {}", session_id, user_id);
        session_id
    }

    /// Resolves a token to its user id, treating unknown and expired tokens
    /// as anonymous
    pub async fn resolve(&self, session_id: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(session_id)?;

        if let Some(expiry) = self.expiry_duration {
            if session.is_expired(expiry) {
                return None;
            }
        }

        Some(session.user_id.clone())
    }

    /// Destroys a session. Destroying an unknown token is a no-op so logout
    /// stays idempotent.
    pub async fn destroy_session(&self, session_id: &str) {
        let mut sessions = self.sessions.write().await;

        if sessions.remove(session_id).is_some() {
            tracing::debug!("Destroyed session: {}", session_id);
        }
    }

    /// Removes expired sessions from the store, returning how many were
    /// dropped
    pub async fn cleanup_expired_sessions(&self) -> usize {
        let Some(expiry) = self.expiry_duration else {
            return 0;
        };

        let mut sessions = self.sessions.write().await;
        let initial_count = sessions.len();

        sessions.retain(|_, session| !session.is_expired(expiry));

        let removed_count = initial_count - sessions.len();

        if removed_count > 0 {
            tracing::info!("Cleaned up {} expired sessions", removed_count);
        }

        removed_count
    }

    /// Gets the number of stored sessions
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_resolve_session() {
        let manager = SessionManager::new();
        let session_id = manager.create_session("user-1").await;

        assert!(!session_id.is_empty());
        assert_eq!(manager.resolve(&session_id).await, Some("user-1".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_token_is_anonymous() {
        let manager = SessionManager::new();
        assert_eq!(manager.resolve("no-such-token").await, None);
    }

    #[tokio::test]
    async fn test_destroy_session() {
        let manager = SessionManager::new();
        let session_id = manager.create_session("user-1").await;

        manager.destroy_session(&session_id).await;
        assert_eq!(manager.resolve(&session_id).await, None);

        // Idempotent
        manager.destroy_session(&session_id).await;
    }

    #[tokio::test]
    async fn test_session_expiry() {
        let manager = SessionManager::with_expiry(Duration::from_millis(50));
        let session_id = manager.create_session("user-1").await;

        assert!(manager.resolve(&session_id).await.is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(manager.resolve(&session_id).await, None);
    }

    #[tokio::test]
    async fn test_cleanup_expired_sessions() {
        let manager = SessionManager::with_expiry(Duration::from_millis(50));

        for i in 0..5 {
            manager.create_session(&format!("user-{}", i)).await;
        }
        assert_eq!(manager.session_count().await, 5);

        tokio::time::sleep(Duration::from_millis(100)).await;

        let removed = manager.cleanup_expired_sessions().await;
        assert_eq!(removed, 5);
        assert_eq!(manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_no_expiry_by_default() {
        let manager = SessionManager::new();
        manager.create_session("user-1").await;

        assert_eq!(manager.cleanup_expired_sessions().await, 0);
        assert_eq!(manager.session_count().await, 1);
    }
}
