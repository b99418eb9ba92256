//! Change Password Use Case

use std::sync::Arc;

use kernel::id::UserId;
use kernel::validation::Validator;

use crate::application::checked_password;
use crate::application::config::AuthConfig;
use crate::domain::entity::credentials::Credentials;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub const CURRENT_PASSWORD_MIN: usize = 4;
pub const NEW_PASSWORD_MIN: usize = 6;

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_id: &UserId, input: ChangePasswordInput) -> AuthResult<()> {
        let mut v = Validator::new();
        let current = checked_password(
            &mut v,
            "currentPassword",
            input.current_password,
            CURRENT_PASSWORD_MIN,
        );
        let new = checked_password(&mut v, "newPassword", input.new_password, NEW_PASSWORD_MIN);
        v.finish("Invalid request")?;
        let (Some(current), Some(new)) = (current, new) else {
            return Err(AuthError::InvalidPassword);
        };

        let stored = self
            .user_repo
            .credentials_for(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !stored.matches(&current, self.config.pepper()) {
            return Err(AuthError::InvalidPassword);
        }

        let replacement = Credentials::issue(&new, self.config.pepper());
        self.user_repo.update_credentials(user_id, &replacement).await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
