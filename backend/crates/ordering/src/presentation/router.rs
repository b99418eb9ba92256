//! Ordering Router

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use loyalty::{LoyaltyRepository, PgLoyaltyRepository};

use crate::domain::repository::OrderRepository;
use crate::infra::postgres::PgOrderRepository;
use crate::presentation::handlers::{self, OrderingAppState};

/// Create the Ordering router with PostgreSQL repositories
pub fn ordering_router(repo: PgOrderRepository, loyalty: PgLoyaltyRepository) -> Router {
    ordering_router_generic(repo, loyalty)
}

/// Create a generic Ordering router for any repository implementation
pub fn ordering_router_generic<R, L>(repo: R, loyalty: L) -> Router
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    let state = OrderingAppState {
        repo: Arc::new(repo),
        loyalty: Arc::new(loyalty),
    };

    Router::new()
        // Customer
        .route("/orders", post(handlers::place_order::<R, L>))
        .route("/orders/current", get(handlers::current_order::<R, L>))
        .route("/orders/history", get(handlers::order_history::<R, L>))
        .route("/orders/{id}", get(handlers::order_detail::<R, L>))
        .route("/orders/{id}/review", post(handlers::submit_review::<R, L>))
        // Staff
        .route("/staff/orders", get(handlers::staff_orders::<R, L>))
        .route("/staff/orders/{id}/accept", post(handlers::accept_order::<R, L>))
        .route("/staff/orders/{id}/status", post(handlers::update_status::<R, L>))
        .route("/staff/orders/{id}/items", put(handlers::adjust_items::<R, L>))
        .with_state(state)
}
