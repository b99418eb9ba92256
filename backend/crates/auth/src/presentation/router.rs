//! Auth Router

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use audit::{AuditLog, PgAuditLog};
use loyalty::{LoyaltyRepository, PgLoyaltyRepository};

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repositories
pub fn auth_router(
    repo: PgAuthRepository,
    loyalty: PgLoyaltyRepository,
    audit: PgAuditLog,
    config: Arc<AuthConfig>,
) -> Router {
    auth_router_generic(repo, loyalty, audit, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R, L, A>(repo: R, loyalty: L, audit: A, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        loyalty: Arc::new(loyalty),
        audit: Arc::new(audit),
        config,
    };

    Router::new()
        .route("/auth/register-customer", post(handlers::register_customer::<R, L, A>))
        .route("/auth/login", post(handlers::sign_in::<R, L, A>))
        .route("/auth/logout", post(handlers::sign_out::<R, L, A>))
        .route("/auth/me", get(handlers::me::<R, L, A>))
        .route("/auth/change-password", post(handlers::change_password::<R, L, A>))
        .route("/auth/google/start", get(handlers::google_start::<R, L, A>))
        .route("/auth/google/callback", get(handlers::google_callback::<R, L, A>))
        .route(
            "/admin/users",
            get(handlers::list_users::<R, L, A>).post(handlers::create_user::<R, L, A>),
        )
        .route("/admin/users/{id}", put(handlers::update_user::<R, L, A>))
        .with_state(state)
}
