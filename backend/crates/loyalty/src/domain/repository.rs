//! Repository Traits

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::badge::BadgeLevel;
use crate::error::LoyaltyResult;

/// New discount for one badge key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountUpdate {
    pub key: String,
    pub discount_percent: i32,
}

/// Customer name and running point total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCustomer {
    pub name: String,
    pub points: i64,
}

#[trait_variant::make(LoyaltyRepository: Send)]
pub trait LocalLoyaltyRepository {
    /// Running point total; 0 when the user has no points row.
    async fn points_for(&self, user_id: &UserId) -> LoyaltyResult<i64>;

    /// All tiers ordered by `sort_order`, then `min_points`.
    async fn badge_levels(&self) -> LoyaltyResult<Vec<BadgeLevel>>;

    /// Apply every update or none. Unknown keys fail the batch.
    async fn update_discounts(&self, updates: &[DiscountUpdate]) -> LoyaltyResult<()>;

    /// Customers by points, highest first.
    async fn top_customers(&self, limit: i64) -> LoyaltyResult<Vec<RankedCustomer>>;

    /// Point totals of every customer account.
    async fn customer_points(&self) -> LoyaltyResult<Vec<i64>>;
}
