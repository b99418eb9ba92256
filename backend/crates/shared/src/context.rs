//! Request Context
//!
//! The caller identity resolved once per request by the session middleware
//! and handed to every handler. Anonymous requests carry `user: None`.

use serde::Serialize;

use crate::error::app_error::{AppError, AppResult};
use crate::id::UserId;
use crate::role::UserRole;

/// Authenticated, active user attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: UserId,
    pub role: UserRole,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub username: Option<String>,
    pub must_change_password: bool,
}

/// Per-request caller context.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    user: Option<CurrentUser>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// 401 unless a user is attached.
    pub fn require_auth(&self) -> AppResult<&CurrentUser> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))
    }

    /// 401 without a user, 403 when the user's role is not listed.
    pub fn require_role(&self, allowed: &[UserRole]) -> AppResult<&CurrentUser> {
        let user = self.require_auth()?;
        if allowed.contains(&user.role) {
            Ok(user)
        } else {
            Err(AppError::forbidden("Forbidden"))
        }
    }
}
