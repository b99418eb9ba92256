//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::pagination::{Page, Paginated};
use kernel::role::UserRole;

use crate::domain::entity::{credentials::Credentials, session::Session, user::User};
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::AuthResult;

/// Partial admin edit of a user; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub role: Option<UserRole>,
    pub name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<Phone>,
    pub username: Option<String>,
    pub is_active: Option<bool>,
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert the user, a zero points row and, when given, a first session
    /// in one transaction.
    async fn create(
        &self,
        user: &User,
        credentials: &Credentials,
        session: Option<&Session>,
    ) -> AuthResult<()>;

    async fn phone_exists(&self, phone: &Phone) -> AuthResult<bool>;

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>>;

    /// Active user whose phone or username equals `identifier`.
    async fn find_active_by_login(&self, identifier: &str) -> AuthResult<Option<(User, Credentials)>>;

    async fn credentials_for(&self, id: &UserId) -> AuthResult<Option<Credentials>>;

    /// Replace the password and clear the must-change flag.
    async fn update_credentials(&self, id: &UserId, credentials: &Credentials) -> AuthResult<()>;

    /// Newest first.
    async fn list(&self, page: Page) -> AuthResult<Paginated<User>>;

    /// Returns `false` when no user has `id`.
    async fn apply_patch(&self, id: &UserId, patch: &UserPatch) -> AuthResult<bool>;

    async fn any_admin(&self) -> AuthResult<bool>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Session with this hash whose `expires_at` is after `now`.
    async fn find_live(&self, token_hash: &str, now: DateTime<Utc>) -> AuthResult<Option<Session>>;

    async fn touch(&self, token_hash: &str, at: DateTime<Utc>) -> AuthResult<()>;

    /// Deleting an unknown hash is not an error.
    async fn delete_by_token_hash(&self, token_hash: &str) -> AuthResult<()>;

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}
