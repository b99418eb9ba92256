//! Catalog Router

use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use audit::{AuditLog, PgAuditLog};
use loyalty::{LoyaltyRepository, PgLoyaltyRepository};

use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState, CatalogStore};

/// Create the Catalog router with PostgreSQL repositories
pub fn catalog_router(repo: PgCatalogRepository, loyalty: PgLoyaltyRepository, audit: PgAuditLog) -> Router {
    catalog_router_generic(repo, loyalty, audit)
}

/// Create a generic Catalog router for any repository implementation
pub fn catalog_router_generic<R, L, A>(repo: R, loyalty: L, audit: A) -> Router
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        loyalty: Arc::new(loyalty),
        audit: Arc::new(audit),
    };

    Router::new()
        // Public
        .route("/menu", get(handlers::menu::<R, L, A>))
        .route("/products", get(handlers::products::<R, L, A>))
        .route("/settings/theme", get(handlers::get_theme::<R, L, A>))
        // Admin
        .route(
            "/admin/settings/theme",
            get(handlers::admin_get_theme::<R, L, A>).post(handlers::set_theme::<R, L, A>),
        )
        .route(
            "/admin/categories",
            get(handlers::list_categories::<R, L, A>).post(handlers::create_category::<R, L, A>),
        )
        .route(
            "/admin/categories/{id}",
            put(handlers::update_category::<R, L, A>).delete(handlers::deactivate_category::<R, L, A>),
        )
        .route(
            "/admin/products",
            get(handlers::list_products::<R, L, A>).post(handlers::create_product::<R, L, A>),
        )
        .route(
            "/admin/products/{id}",
            put(handlers::update_product::<R, L, A>).delete(handlers::deactivate_product::<R, L, A>),
        )
        .route("/admin/locations", get(handlers::list_locations::<R, L, A>))
        .route(
            "/admin/tables",
            get(handlers::list_tables::<R, L, A>).post(handlers::create_table::<R, L, A>),
        )
        .route("/admin/tables/{id}", put(handlers::update_table::<R, L, A>))
        .route("/admin/reports/sales", get(handlers::sales_report::<R, L, A>))
        .route("/admin/reports/best-items", get(handlers::best_items_report::<R, L, A>))
        .with_state(state)
}
