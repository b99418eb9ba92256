//! API DTOs (Data Transfer Objects)
//!
//! Customer-facing bodies are camelCase; admin bodies keep the snake_case
//! column names the admin console was built against.

use kernel::id::UserId;
use kernel::role::UserRole;
use loyalty::CustomerProfile;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Registration / Sign In
// ============================================================================

/// Missing fields decode as empty so validation can report them per field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterCustomerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomerResponse {
    pub user: CustomerProfile,
    pub temp_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignInRequest {
    /// Phone number or username
    pub identifier: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

/// `{user}` for sign-in; `{user: null}` from `/me` when anonymous.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: Option<CustomerProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

// ============================================================================
// Admin users
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: String,
    pub password: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub role: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: UserId,
}

#[derive(Debug, Serialize)]
pub struct AdminUserDto {
    pub id: UserId,
    pub role: UserRole,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub username: Option<String>,
    pub must_change_password: bool,
    pub is_active: bool,
}

impl From<User> for AdminUserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name,
            email: user.email.map(|e| e.as_str().to_string()),
            phone: user.phone.as_str().to_string(),
            username: user.username,
            must_change_password: user.must_change_password,
            is_active: user.is_active,
        }
    }
}
