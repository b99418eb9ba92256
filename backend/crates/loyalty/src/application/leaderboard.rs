use std::sync::Arc;

use serde::Serialize;

use crate::domain::repository::LoyaltyRepository;
use crate::error::LoyaltyResult;

/// Customers shown on the leaderboard.
pub const LEADERBOARD_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub points: i64,
}

pub struct LeaderboardUseCase<R>
where
    R: LoyaltyRepository,
{
    repo: Arc<R>,
}

impl<R> LeaderboardUseCase<R>
where
    R: LoyaltyRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> LoyaltyResult<Vec<LeaderboardEntry>> {
        let customers = self.repo.top_customers(LEADERBOARD_SIZE).await?;
        Ok(customers
            .into_iter()
            .enumerate()
            .map(|(i, customer)| LeaderboardEntry {
                rank: i + 1,
                name: customer.name,
                points: customer.points,
            })
            .collect())
    }
}
