//! Sign Out Use Case
//!
//! Revokes the session behind a cookie token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Idempotent: unknown or already revoked tokens succeed.
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let token_hash = platform::crypto::hash_token(session_token, &self.config.session_secret);
        self.session_repo.delete_by_token_hash(&token_hash).await?;

        tracing::info!("User signed out");
        Ok(())
    }
}
