// Auth service - registration and credential checks
use std::sync::Arc;

use crate::db::BlogStore;
use crate::error::{AppError, Result};
use crate::models::{NewUser, User};
use crate::security::{hash_password, verify_password, TokenService, DUMMY_PASSWORD_HASH};

const INVALID_CREDENTIALS: &str = "invalid username or password";

pub struct AuthService {
    store: Arc<dyn BlogStore>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(store: Arc<dyn BlogStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        if self.store.find_user_by_username(username).await?.is_some() {
            return Err(AppError::Conflict("username already exists".to_string()));
        }
        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("email already registered".to_string()));
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing task failed: {e}")))??;

        // A concurrent registration that passed the checks above still hits
        // the unique constraints and comes back as a conflict.
        let user = self
            .store
            .create_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Checks credentials and issues a token. Unknown usernames and wrong
    /// passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String)> {
        let user = self.store.find_user_by_username(username).await?;

        // Unknown accounts verify against a dummy hash; every failed login
        // runs exactly one Argon2 verification.
        let candidate = password.to_string();
        let stored_hash = user
            .as_ref()
            .map_or_else(|| DUMMY_PASSWORD_HASH.to_string(), |u| u.password_hash.clone());
        let valid = tokio::task::spawn_blocking(move || verify_password(&candidate, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password verification task failed: {e}")))?;

        let Some(user) = user.filter(|_| valid) else {
            tracing::warn!(%username, "login failed");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let token = self.tokens.issue(user.id, &user.username)?;
        tracing::info!(user_id = user.id, "user logged in");
        Ok((user, token))
    }
}
