//! Register Customer Use Case
//!
//! Self-service sign-up at the table. The customer receives a one-time
//! temporary password and is signed in immediately.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::validation::Validator;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{credentials::Credentials, session::Session, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterCustomerInput {
    pub name: String,
    /// `""` is treated as absent
    pub email: Option<String>,
    pub phone: String,
}

/// Register output
pub struct RegisterCustomerOutput {
    pub user: User,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    /// Shown to the customer once
    pub temp_password: ClearTextPassword,
}

/// Register customer use case
pub struct RegisterCustomerUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterCustomerUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterCustomerInput) -> AuthResult<RegisterCustomerOutput> {
        let email_raw = input.email.unwrap_or_default();

        let mut v = Validator::new();
        v.min_chars("name", &input.name, 1)
            .check(
                "email",
                email_raw.is_empty() || Email::is_valid(&email_raw),
                "Invalid email",
            )
            .check("phone", Phone::is_valid(&input.phone), "Invalid phone");
        v.finish("Invalid registration")?;

        let phone = Phone::new(input.phone)?;
        let email = Email::optional(Some(email_raw))?;

        if self.user_repo.phone_exists(&phone).await? {
            return Err(AuthError::PhoneTaken);
        }

        let temp_password = ClearTextPassword::generate_temporary();
        let credentials = Credentials::issue(&temp_password, self.config.pepper());
        let user = User::new_customer(input.name, email, phone);

        let issued = Session::issue(
            user.id,
            self.config.session_ttl,
            &self.config.session_secret,
            Utc::now(),
        );

        self.user_repo
            .create(&user, &credentials, Some(&issued.session))
            .await?;

        tracing::info!(user_id = %user.id, "Customer registered");

        Ok(RegisterCustomerOutput {
            user,
            session_token: issued.token,
            expires_at: issued.session.expires_at,
            temp_password,
        })
    }
}
