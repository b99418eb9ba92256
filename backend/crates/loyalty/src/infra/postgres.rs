//! PostgreSQL Repository Implementation

use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::badge::BadgeLevel;
use crate::domain::repository::{DiscountUpdate, LoyaltyRepository, RankedCustomer};
use crate::error::{LoyaltyError, LoyaltyResult};

/// PostgreSQL-backed loyalty repository
#[derive(Clone)]
pub struct PgLoyaltyRepository {
    pool: PgPool,
}

impl PgLoyaltyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LoyaltyRepository for PgLoyaltyRepository {
    async fn points_for(&self, user_id: &UserId) -> LoyaltyResult<i64> {
        let points = sqlx::query_scalar::<_, i64>(
            "SELECT points_total FROM user_points WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(points.unwrap_or(0))
    }

    async fn badge_levels(&self) -> LoyaltyResult<Vec<BadgeLevel>> {
        let rows = sqlx::query_as::<_, BadgeLevelRow>(
            r#"
            SELECT
                key,
                display_name_en,
                display_name_bn,
                min_points,
                discount_percent,
                sort_order
            FROM badge_levels
            ORDER BY sort_order ASC, min_points ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BadgeLevelRow::into_badge_level).collect())
    }

    async fn update_discounts(&self, updates: &[DiscountUpdate]) -> LoyaltyResult<()> {
        let mut tx = self.pool.begin().await?;

        for update in updates {
            let affected = sqlx::query(
                "UPDATE badge_levels SET discount_percent = $2 WHERE key = $1",
            )
            .bind(&update.key)
            .bind(update.discount_percent)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if affected == 0 {
                // tx is rolled back on drop
                return Err(LoyaltyError::UnknownBadge(update.key.clone()));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn top_customers(&self, limit: i64) -> LoyaltyResult<Vec<RankedCustomer>> {
        let rows = sqlx::query_as::<_, RankedCustomerRow>(
            r#"
            SELECT u.name, COALESCE(p.points_total, 0) AS points
            FROM users u
            LEFT JOIN user_points p ON p.user_id = u.id
            WHERE u.role = 'customer'
            ORDER BY points DESC, u.name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RankedCustomer {
                name: r.name,
                points: r.points,
            })
            .collect())
    }

    async fn customer_points(&self) -> LoyaltyResult<Vec<i64>> {
        let points = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(p.points_total, 0)
            FROM users u
            LEFT JOIN user_points p ON p.user_id = u.id
            WHERE u.role = 'customer'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct BadgeLevelRow {
    key: String,
    display_name_en: String,
    display_name_bn: String,
    min_points: i64,
    discount_percent: i32,
    sort_order: i32,
}

impl BadgeLevelRow {
    fn into_badge_level(self) -> BadgeLevel {
        BadgeLevel {
            key: self.key,
            display_name_en: self.display_name_en,
            display_name_bn: self.display_name_bn,
            min_points: self.min_points,
            discount_percent: self.discount_percent,
            sort_order: self.sort_order,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RankedCustomerRow {
    name: String,
    points: i64,
}
