//! Manage Users Use Case
//!
//! Admin and manager maintenance of staff and customer accounts. Every
//! mutation is written to the audit log.

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, AuditLog};
use kernel::context::CurrentUser;
use kernel::id::UserId;
use kernel::pagination::{PageQuery, Paginated};
use kernel::role::UserRole;
use kernel::validation::Validator;
use serde::Serialize;

use crate::application::checked_password;
use crate::application::config::AuthConfig;
use crate::domain::entity::{credentials::Credentials, user::User};
use crate::domain::repository::{UserPatch, UserRepository};
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::{AuthError, AuthResult};

pub const MAX_USER_PAGE_SIZE: i64 = 200;
pub const MANAGED_PASSWORD_MIN: usize = 4;
pub const USERNAME_MIN: usize = 3;

pub struct CreateUserInput {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: String,
    pub password: String,
    pub username: Option<String>,
}

#[derive(Debug, Default)]
pub struct UpdateUserInput {
    pub role: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
    pub is_active: Option<bool>,
}

/// Audit payload; never includes the password.
#[derive(Serialize)]
struct UserAuditPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

pub struct ManageUsersUseCase<U, A>
where
    U: UserRepository,
    A: AuditLog,
{
    user_repo: Arc<U>,
    audit: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<U, A> ManageUsersUseCase<U, A>
where
    U: UserRepository,
    A: AuditLog,
{
    pub fn new(user_repo: Arc<U>, audit: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            audit,
            config,
        }
    }

    pub async fn list(&self, query: PageQuery) -> AuthResult<Paginated<User>> {
        self.user_repo.list(query.resolve(MAX_USER_PAGE_SIZE)).await
    }

    pub async fn create(&self, actor: &CurrentUser, input: CreateUserInput) -> AuthResult<UserId> {
        let email_raw = input.email.unwrap_or_default();
        let role = UserRole::from_code(&input.role);

        let mut v = Validator::new();
        v.min_chars("name", &input.name, 1)
            .check("phone", Phone::is_valid(&input.phone), "Invalid phone")
            .check(
                "email",
                email_raw.is_empty() || Email::is_valid(&email_raw),
                "Invalid email",
            )
            .check("role", role.is_some(), "Invalid role");
        if let Some(username) = &input.username {
            v.min_chars("username", username, USERNAME_MIN);
        }
        let password = checked_password(&mut v, "password", input.password, MANAGED_PASSWORD_MIN);
        v.finish("Invalid user")?;
        let (Some(role), Some(password)) = (role, password) else {
            return Err(AuthError::App(kernel::AppError::bad_request("Invalid user")));
        };

        let phone = Phone::new(input.phone)?;
        if self.user_repo.phone_exists(&phone).await? {
            return Err(AuthError::PhoneTaken);
        }

        let username = input
            .username
            .unwrap_or_else(|| phone.as_str().to_string())
            .trim()
            .to_string();
        let email = Email::optional(Some(email_raw))?;

        let user = User::new_managed(role, input.name, email, phone, username);
        let credentials = Credentials::issue(&password, self.config.pepper());
        self.user_repo.create(&user, &credentials, None).await?;

        let payload = UserAuditPayload {
            role: Some(user.role.code()),
            name: Some(&user.name),
            email: user.email.as_ref().map(Email::as_str),
            phone: Some(user.phone.as_str()),
            username: user.username.as_deref(),
            is_active: None,
        };
        let entry = AuditEntry::new(actor.id, AuditAction::Create, "user", user.id)
            .with_payload(&payload);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, user_id = %user.id, role = %user.role, "User created");

        Ok(user.id)
    }

    pub async fn update(
        &self,
        actor: &CurrentUser,
        id: &UserId,
        input: UpdateUserInput,
    ) -> AuthResult<()> {
        let role = input.role.as_deref().map(UserRole::from_code);

        let mut v = Validator::new();
        v.check("role", !matches!(role, Some(None)), "Invalid role");
        if let Some(email) = &input.email {
            v.check("email", Email::is_valid(email), "Invalid email");
        }
        if let Some(phone) = &input.phone {
            v.check("phone", Phone::is_valid(phone), "Invalid phone");
        }
        if let Some(username) = &input.username {
            v.min_chars("username", username, USERNAME_MIN);
        }
        v.finish("Invalid user update")?;

        let patch = UserPatch {
            role: role.flatten(),
            name: input.name,
            email: input.email.map(Email::new).transpose()?,
            phone: input.phone.map(Phone::new).transpose()?,
            username: input.username,
            is_active: input.is_active,
        };

        if !self.user_repo.apply_patch(id, &patch).await? {
            return Err(AuthError::UserNotFound);
        }

        let payload = UserAuditPayload {
            role: patch.role.as_ref().map(UserRole::code),
            name: patch.name.as_deref(),
            email: patch.email.as_ref().map(Email::as_str),
            phone: patch.phone.as_ref().map(Phone::as_str),
            username: patch.username.as_deref(),
            is_active: patch.is_active,
        };
        let entry = AuditEntry::new(actor.id, AuditAction::Update, "user", id).with_payload(&payload);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, user_id = %id, "User updated");

        Ok(())
    }
}
