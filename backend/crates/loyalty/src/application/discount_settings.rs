//! Discount Settings Use Case
//!
//! Lets admins and managers change the discount attached to each badge.
//! Orders already placed keep the percent they were priced with.

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, AuditLog};
use kernel::context::CurrentUser;
use kernel::validation::Validator;

use crate::domain::badge::BadgeLevel;
use crate::domain::repository::{DiscountUpdate, LoyaltyRepository};
use crate::error::LoyaltyResult;

pub struct DiscountSettingsUseCase<R, A>
where
    R: LoyaltyRepository,
    A: AuditLog,
{
    repo: Arc<R>,
    audit: Arc<A>,
}

impl<R, A> DiscountSettingsUseCase<R, A>
where
    R: LoyaltyRepository,
    A: AuditLog,
{
    pub fn new(repo: Arc<R>, audit: Arc<A>) -> Self {
        Self { repo, audit }
    }

    pub async fn list(&self) -> LoyaltyResult<Vec<BadgeLevel>> {
        self.repo.badge_levels().await
    }

    pub async fn update(&self, actor: &CurrentUser, badges: Vec<DiscountUpdate>) -> LoyaltyResult<()> {
        let mut v = Validator::new();
        for badge in &badges {
            v.min_chars("key", &badge.key, 1)
                .range("discount_percent", badge.discount_percent.into(), 0, 100);
        }
        v.finish("Invalid discounts")?;

        self.repo.update_discounts(&badges).await?;

        let entry = AuditEntry::new(actor.id, AuditAction::Update, "badge_levels", "discounts")
            .with_payload(&serde_json::json!({ "badges": badges }));
        self.audit.append(&entry).await?;

        tracing::info!(
            actor = %actor.id,
            badges = badges.len(),
            "Badge discounts updated"
        );

        Ok(())
    }
}
