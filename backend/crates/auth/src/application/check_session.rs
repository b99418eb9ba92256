//! Check Session Use Case
//!
//! Resolves a cookie token to the active user behind it.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> CheckSessionUseCase<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// `None` for unknown, expired or tampered tokens and for deactivated
    /// users. Only store failures are errors.
    pub async fn resolve(&self, session_token: &str) -> AuthResult<Option<User>> {
        let token_hash = platform::crypto::hash_token(session_token, &self.config.session_secret);
        let now = Utc::now();

        let Some(session) = self.session_repo.find_live(&token_hash, now).await? else {
            return Ok(None);
        };

        let Some(user) = self
            .user_repo
            .find_by_id(&session.user_id)
            .await?
            .filter(User::can_login)
        else {
            return Ok(None);
        };

        // Update last activity in background
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.touch(&token_hash, now).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(Some(user))
    }
}
