use kernel::context::CurrentUser;
use kernel::id::UserId;
use kernel::role::UserRole;
use serde::Serialize;

use crate::domain::badge::BadgeLevel;

/// Badge as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeView {
    pub key: String,
    pub display_name: String,
    pub min_points: i64,
    pub discount_percent: i32,
}

impl From<&BadgeLevel> for BadgeView {
    fn from(level: &BadgeLevel) -> Self {
        Self {
            key: level.key.clone(),
            display_name: level.display_name_en.clone(),
            min_points: level.min_points,
            discount_percent: level.discount_percent,
        }
    }
}

/// The signed-in user with their points and current badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub id: UserId,
    pub role: UserRole,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub username: String,
    pub points: i64,
    pub badge: BadgeView,
    pub discount_percent: i32,
    pub must_change_password: bool,
}

impl CustomerProfile {
    pub fn build(user: &CurrentUser, points: i64, badge: &BadgeLevel) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            username: user.username.clone().unwrap_or_else(|| user.phone.clone()),
            points,
            badge: BadgeView::from(badge),
            discount_percent: badge.discount_percent,
            must_change_password: user.must_change_password,
        }
    }
}
