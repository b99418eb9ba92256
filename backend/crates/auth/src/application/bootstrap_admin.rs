//! Bootstrap Admin Use Case
//!
//! Creates the first admin account on an empty installation so the admin
//! console is reachable. Does nothing once any admin exists.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{credentials::Credentials, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::AuthResult;
use kernel::role::UserRole;

pub const DEFAULT_ADMIN_NAME: &str = "Admin";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PHONE: &str = "01000000000";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@cafe.local";

pub struct BootstrapAdminInput {
    pub password: ClearTextPassword,
}

pub struct BootstrapAdminUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> BootstrapAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Returns `true` when an admin was created.
    pub async fn execute(&self, input: BootstrapAdminInput) -> AuthResult<bool> {
        if self.user_repo.any_admin().await? {
            return Ok(false);
        }

        let phone = Phone::new(DEFAULT_ADMIN_PHONE)?;
        if self.user_repo.phone_exists(&phone).await? {
            tracing::warn!(phone = DEFAULT_ADMIN_PHONE, "Default admin phone taken by a non-admin");
            return Ok(false);
        }

        let user = User::new_managed(
            UserRole::Admin,
            DEFAULT_ADMIN_NAME.to_string(),
            Some(Email::new(DEFAULT_ADMIN_EMAIL)?),
            phone,
            DEFAULT_ADMIN_USERNAME.to_string(),
        );
        let credentials = Credentials::issue(&input.password, self.config.pepper());
        self.user_repo.create(&user, &credentials, None).await?;

        tracing::info!(
            user_id = %user.id,
            username = DEFAULT_ADMIN_USERNAME,
            "Default admin created"
        );
        Ok(true)
    }
}
