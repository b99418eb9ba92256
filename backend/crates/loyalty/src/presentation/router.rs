//! Loyalty Router

use axum::{Router, routing::get};
use std::sync::Arc;

use audit::{AuditLog, PgAuditLog};

use crate::domain::repository::LoyaltyRepository;
use crate::infra::postgres::PgLoyaltyRepository;
use crate::presentation::handlers::{self, LoyaltyAppState};

/// Create the Loyalty router with PostgreSQL repositories
pub fn loyalty_router(repo: PgLoyaltyRepository, audit: PgAuditLog) -> Router {
    loyalty_router_generic(repo, audit)
}

/// Create a generic Loyalty router for any repository implementation
pub fn loyalty_router_generic<R, A>(repo: R, audit: A) -> Router
where
    R: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let state = LoyaltyAppState {
        repo: Arc::new(repo),
        audit: Arc::new(audit),
    };

    Router::new()
        .route("/leaderboard", get(handlers::public_leaderboard::<R, A>))
        .route("/admin/leaderboard", get(handlers::admin_leaderboard::<R, A>))
        .route("/admin/reports/badges", get(handlers::badge_report::<R, A>))
        .route(
            "/admin/settings/discounts",
            get(handlers::list_discounts::<R, A>).post(handlers::update_discounts::<R, A>),
        )
        .with_state(state)
}
