//! User Entity
//!
//! Customer and staff accounts share one shape; the role decides what a
//! user may do. Accounts are deactivated, never deleted.

use chrono::{DateTime, Utc};
use kernel::context::CurrentUser;
use kernel::id::UserId;
use kernel::role::UserRole;

use crate::domain::value_object::{email::Email, phone::Phone};

/// User entity
///
/// Password material lives in [`Credentials`](super::credentials::Credentials).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub role: UserRole,
    pub name: String,
    pub email: Option<Email>,
    pub phone: Phone,
    /// Login name; `None` means the phone number is used.
    pub username: Option<String>,
    pub must_change_password: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Self-registered customer; logs in with the phone number.
    pub fn new_customer(name: String, email: Option<Email>, phone: Phone) -> Self {
        let now = Utc::now();
        let username = Some(phone.as_str().to_string());
        Self {
            id: UserId::new(),
            role: UserRole::Customer,
            name,
            email,
            phone,
            username,
            must_change_password: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Account created by an admin; the first login must replace the password.
    pub fn new_managed(
        role: UserRole,
        name: String,
        email: Option<Email>,
        phone: Phone,
        username: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            role,
            name,
            email,
            phone,
            username: Some(username),
            must_change_password: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Login name, falling back to the phone number.
    pub fn login_name(&self) -> &str {
        self.username.as_deref().unwrap_or(self.phone.as_str())
    }

    pub fn to_current_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            role: self.role,
            name: self.name.clone(),
            email: self.email.as_ref().map(|e| e.as_str().to_string()),
            phone: self.phone.as_str().to_string(),
            username: self.username.clone(),
            must_change_password: self.must_change_password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_username_is_phone() {
        let user = User::new_customer("Rahim".into(), None, Phone::new("01711111111").unwrap());
        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.login_name(), "01711111111");
        assert!(!user.must_change_password);
        assert!(user.can_login());
    }

    #[test]
    fn test_managed_account_must_change_password() {
        let user = User::new_managed(
            UserRole::Chef,
            "Nadia".into(),
            None,
            Phone::new("01822222222").unwrap(),
            "nadia".into(),
        );
        assert!(user.must_change_password);
        assert_eq!(user.to_current_user().username.as_deref(), Some("nadia"));
    }
}
