//! Sign In Use Case
//!
//! Authenticates a user by phone or username and creates a session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::validation::Validator;

use crate::application::checked_password;
use crate::application::config::AuthConfig;
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Minimum length accepted at login
pub const LOGIN_PASSWORD_MIN: usize = 4;

/// Sign in input
pub struct SignInInput {
    /// Phone number or username
    pub identifier: Option<String>,
    /// Older clients send `phone` instead of `identifier`
    pub phone: Option<String>,
    pub password: String,
    /// Rate-limit key, usually the client IP
    pub client_key: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let identifier = input
            .identifier
            .filter(|s| !s.is_empty())
            .or(input.phone)
            .unwrap_or_default()
            .trim()
            .to_string();

        let mut v = Validator::new();
        v.check("identifier", !identifier.is_empty(), "Identifier is required");
        let password = checked_password(&mut v, "password", input.password, LOGIN_PASSWORD_MIN);
        v.finish("Invalid login")?;
        let Some(password) = password else {
            return Err(AuthError::InvalidCredentials);
        };

        let limiter = &self.config.login_limiter;
        if limiter.is_limited(&input.client_key) {
            return Err(AuthError::RateLimited);
        }

        let Some((user, credentials)) = self.user_repo.find_active_by_login(&identifier).await? else {
            limiter.record_failure(&input.client_key);
            return Err(AuthError::InvalidCredentials);
        };

        if !credentials.matches(&password, self.config.pepper()) {
            limiter.record_failure(&input.client_key);
            return Err(AuthError::InvalidCredentials);
        }

        let issued = Session::issue(
            user.id,
            self.config.session_ttl,
            &self.config.session_secret,
            Utc::now(),
        );
        self.session_repo.create(&issued.session).await?;

        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            session_id = %issued.session.id,
            "User signed in"
        );

        Ok(SignInOutput {
            user,
            session_token: issued.token,
            expires_at: issued.session.expires_at,
        })
    }
}
