use std::sync::Arc;

use crate::domain::badge::{BadgeBand, badge_distribution};
use crate::domain::repository::LoyaltyRepository;
use crate::error::LoyaltyResult;

/// How many customers sit in each badge band.
pub struct BadgeReportUseCase<R>
where
    R: LoyaltyRepository,
{
    repo: Arc<R>,
}

impl<R> BadgeReportUseCase<R>
where
    R: LoyaltyRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> LoyaltyResult<Vec<BadgeBand>> {
        let tiers = self.repo.badge_levels().await?;
        let points = self.repo.customer_points().await?;
        Ok(badge_distribution(&points, &tiers))
    }
}
