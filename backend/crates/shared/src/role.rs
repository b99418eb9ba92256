use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the five fixed roles a user account can hold.
///
/// Roles are flat: routes list every role they accept and no role implies
/// another (an admin is not implicitly a manager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
    Manager,
    Chef,
    Employee,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Customer,
        UserRole::Admin,
        UserRole::Manager,
        UserRole::Chef,
        UserRole::Employee,
    ];

    /// Route role sets used across the API.
    pub const ADMIN_OR_MANAGER: &'static [UserRole] = &[UserRole::Admin, UserRole::Manager];
    pub const KITCHEN: &'static [UserRole] = &[
        UserRole::Chef,
        UserRole::Employee,
        UserRole::Manager,
        UserRole::Admin,
    ];
    pub const FRONT_OF_HOUSE: &'static [UserRole] =
        &[UserRole::Employee, UserRole::Manager, UserRole::Admin];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Customer => "customer",
            Admin => "admin",
            Manager => "manager",
            Chef => "chef",
            Employee => "employee",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.code() == code)
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_code() {
        assert_eq!(UserRole::from_code("customer"), Some(UserRole::Customer));
        assert_eq!(UserRole::from_code("chef"), Some(UserRole::Chef));
        assert_eq!(UserRole::from_code("Admin"), None);
        assert_eq!(UserRole::from_code("super_admin"), None);
    }

    #[test]
    fn test_role_display_round_trips_through_from_str() {
        for role in UserRole::ALL {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
    }

    #[test]
    fn test_role_sets_are_explicit() {
        assert!(!UserRole::ADMIN_OR_MANAGER.contains(&UserRole::Employee));
        assert!(UserRole::KITCHEN.contains(&UserRole::Chef));
        assert!(!UserRole::FRONT_OF_HOUSE.contains(&UserRole::Chef));
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&UserRole::Manager).unwrap();
        assert_eq!(json, "\"manager\"");
    }
}
