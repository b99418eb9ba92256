//! In-memory loyalty store for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use kernel::error::app_error::AppError;
use kernel::id::UserId;

use crate::domain::badge::BadgeLevel;
use crate::domain::repository::{DiscountUpdate, LoyaltyRepository, RankedCustomer};
use crate::error::{LoyaltyError, LoyaltyResult};

#[derive(Clone, Default)]
pub struct InMemoryLoyalty {
    tiers: Arc<Mutex<Vec<BadgeLevel>>>,
    customers: Arc<Mutex<Vec<(UserId, String, i64)>>>,
}

fn locked<T>(m: &Mutex<T>) -> LoyaltyResult<MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| LoyaltyError::App(AppError::internal("loyalty store poisoned")))
}

impl InMemoryLoyalty {
    /// The tiers of `0002_seed.sql`: NEWBIE 0 / 0%, REGULAR 500 / 3%,
    /// LOYAL 1500 / 5%, VIP 5000 / 10%.
    pub fn seeded() -> Self {
        Self::with_tiers(vec![
            tier("NEWBIE", 0, 0, 1),
            tier("REGULAR", 500, 3, 2),
            tier("LOYAL", 1500, 5, 3),
            tier("VIP", 5000, 10, 4),
        ])
    }

    pub fn with_tiers(tiers: Vec<BadgeLevel>) -> Self {
        let repo = Self::default();
        if let Ok(mut t) = repo.tiers.lock() {
            *t = tiers;
        }
        repo
    }

    pub fn add_customer(&self, name: &str, points: i64) -> UserId {
        let id = UserId::new();
        if let Ok(mut c) = self.customers.lock() {
            c.push((id, name.to_string(), points));
        }
        id
    }

    /// Credit `points` to `user_id`, creating the entry when missing.
    pub fn add_points(&self, user_id: &UserId, points: i64) {
        let Ok(mut customers) = self.customers.lock() else {
            return;
        };
        match customers.iter_mut().find(|(id, _, _)| id == user_id) {
            Some(entry) => entry.2 += points,
            None => customers.push((*user_id, String::new(), points)),
        }
    }

    pub fn points_of(&self, user_id: &UserId) -> i64 {
        self.customers
            .lock()
            .ok()
            .and_then(|c| c.iter().find(|(id, _, _)| id == user_id).map(|c| c.2))
            .unwrap_or(0)
    }

    pub fn discount_of(&self, key: &str) -> Option<i32> {
        self.tiers
            .lock()
            .ok()?
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.discount_percent)
    }
}

pub fn tier(key: &str, min_points: i64, discount_percent: i32, sort_order: i32) -> BadgeLevel {
    BadgeLevel {
        key: key.to_string(),
        display_name_en: key.to_lowercase(),
        display_name_bn: key.to_lowercase(),
        min_points,
        discount_percent,
        sort_order,
    }
}

impl LoyaltyRepository for InMemoryLoyalty {
    async fn points_for(&self, user_id: &UserId) -> LoyaltyResult<i64> {
        Ok(locked(&self.customers)?
            .iter()
            .find(|(id, _, _)| id == user_id)
            .map(|(_, _, p)| *p)
            .unwrap_or(0))
    }

    async fn badge_levels(&self) -> LoyaltyResult<Vec<BadgeLevel>> {
        let mut tiers = locked(&self.tiers)?.clone();
        tiers.sort_by_key(|t| (t.sort_order, t.min_points));
        Ok(tiers)
    }

    async fn update_discounts(&self, updates: &[DiscountUpdate]) -> LoyaltyResult<()> {
        let mut tiers = locked(&self.tiers)?;
        if let Some(missing) = updates
            .iter()
            .find(|u| !tiers.iter().any(|t| t.key == u.key))
        {
            return Err(LoyaltyError::UnknownBadge(missing.key.clone()));
        }
        for update in updates {
            if let Some(t) = tiers.iter_mut().find(|t| t.key == update.key) {
                t.discount_percent = update.discount_percent;
            }
        }
        Ok(())
    }

    async fn top_customers(&self, limit: i64) -> LoyaltyResult<Vec<RankedCustomer>> {
        let mut all: Vec<RankedCustomer> = locked(&self.customers)?
            .iter()
            .map(|(_, name, points)| RankedCustomer {
                name: name.clone(),
                points: *points,
            })
            .collect();
        all.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
        all.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(all)
    }

    async fn customer_points(&self) -> LoyaltyResult<Vec<i64>> {
        Ok(locked(&self.customers)?.iter().map(|c| c.2).collect())
    }
}
