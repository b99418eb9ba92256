//! Badge standing and profile use cases

use std::sync::Arc;

use kernel::context::CurrentUser;
use kernel::id::UserId;

use crate::domain::badge::{BadgeLevel, badge_for_points};
use crate::domain::profile::CustomerProfile;
use crate::domain::repository::LoyaltyRepository;
use crate::error::LoyaltyResult;

/// A customer's points and the badge they currently qualify for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStanding {
    pub points: i64,
    pub badge: BadgeLevel,
}

pub struct ResolveBadgeUseCase<R>
where
    R: LoyaltyRepository,
{
    repo: Arc<R>,
}

impl<R> ResolveBadgeUseCase<R>
where
    R: LoyaltyRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> LoyaltyResult<BadgeStanding> {
        let points = self.repo.points_for(user_id).await?;
        let tiers = self.repo.badge_levels().await?;
        let badge = badge_for_points(points, &tiers);
        Ok(BadgeStanding { points, badge })
    }
}

pub struct BuildProfileUseCase<R>
where
    R: LoyaltyRepository,
{
    standing: ResolveBadgeUseCase<R>,
}

impl<R> BuildProfileUseCase<R>
where
    R: LoyaltyRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            standing: ResolveBadgeUseCase::new(repo),
        }
    }

    pub async fn execute(&self, user: &CurrentUser) -> LoyaltyResult<CustomerProfile> {
        let standing = self.standing.execute(&user.id).await?;
        Ok(CustomerProfile::build(user, standing.points, &standing.badge))
    }
}
