use crate::models::errors::AppError;
use crate::models::records::UserRecord;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory credential store keyed by email. Records are created once and
/// never mutated or deleted.
#[derive(Clone, Default)]
pub struct CredentialStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a new user and returns the generated user id.
    ///
    /// The write lock is held across the existence check and the insert, so
    /// concurrent signups racing on the same email resolve to exactly one
    /// winner.
    pub async fn create_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let mut users = self.users.write().await;

        if users.contains_key(email) {
            return Err(AppError::conflict("User already exists"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))?
            .to_string();

        let user_id = Uuid::new_v4().to_string();
        users.insert(
            email.to_string(),
            UserRecord {
                user_id: user_id.clone(),
                password_hash,
            },
        );

        tracing::debug!("Created user {} for {}", user_id, email);
        Ok(user_id)
    }

    /// Checks a password against the stored hash. Returns the user id on
    /// success, `None` for an unknown email or a mismatch. Argon2's verify
    /// is constant-time over the hash comparison.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Option<String> {
        let record = {
            let users = self.users.read().await;
            users.get(email).cloned()
        }?;

        let parsed_hash = PasswordHash::new(&record.password_hash).ok()?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .ok()
            .map(|_| record.user_id)
    }

    /// Gets the number of registered users
    pub async fn user_count(&self) -> usize {
        let users = self.users.read().await;
        users.len()
    }
}
