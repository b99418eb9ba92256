//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::sync::Arc;

use audit::PgAuditLog;
use auth::PgAuthRepository;
use auth::application::{BootstrapAdminInput, BootstrapAdminUseCase};
use auth::application::change_password::NEW_PASSWORD_MIN;
use auth::domain::repository::SessionRepository;
use auth::middleware::{AuthMiddlewareState, resolve_session};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use catalog::{PgCatalogRepository, catalog_router};
use loyalty::{PgLoyaltyRepository, loyalty_router};
use ordering::{PgOrderRepository, ordering_router};
use platform::password::ClearTextPassword;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,ordering=info,loyalty=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!(production = config.production, auth = ?config.auth, "Configuration loaded");

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = Arc::new(config.auth.clone());
    let auth_repo = PgAuthRepository::new(pool.clone());

    // Errors here should not prevent server startup
    match auth_repo.cleanup_expired(chrono::Utc::now()).await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Expired session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Expired session cleanup failed, continuing anyway");
        }
    }

    if let Some(raw) = config.admin_password.clone() {
        bootstrap_admin(&auth_repo, auth_config.clone(), raw).await?;
    }

    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    let loyalty_repo = PgLoyaltyRepository::new(pool.clone());
    let audit_log = PgAuditLog::new(pool.clone());

    let api = Router::new()
        .merge(auth::auth_router(
            auth_repo.clone(),
            loyalty_repo.clone(),
            audit_log.clone(),
            auth_config.clone(),
        ))
        .merge(catalog_router(
            PgCatalogRepository::new(pool.clone()),
            loyalty_repo.clone(),
            audit_log.clone(),
        ))
        .merge(ordering_router(PgOrderRepository::new(pool.clone()), loyalty_repo.clone()))
        .merge(loyalty_router(loyalty_repo, audit_log));

    let session_state = AuthMiddlewareState {
        repo: Arc::new(auth_repo),
        config: auth_config,
    };

    let app = Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            session_state,
            resolve_session::<PgAuthRepository>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create the first admin account on an empty installation.
async fn bootstrap_admin(
    repo: &PgAuthRepository,
    config: Arc<auth::AuthConfig>,
    raw: String,
) -> anyhow::Result<()> {
    let password = ClearTextPassword::new(raw, NEW_PASSWORD_MIN)
        .map_err(|e| anyhow::anyhow!("ADMIN_PASSWORD rejected: {e}"))?;

    let use_case = BootstrapAdminUseCase::new(Arc::new(repo.clone()), config);
    if use_case.execute(BootstrapAdminInput { password }).await? {
        tracing::info!("Bootstrap admin account created");
    }
    Ok(())
}
