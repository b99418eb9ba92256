//! Server configuration from the environment

use std::net::SocketAddr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::config::FederatedLoginConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub production: bool,
    /// Password for the first admin account, created only on an empty install
    pub admin_password: Option<String>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let production = var("ENVIRONMENT").is_some_and(|env| env.eq_ignore_ascii_case("production"));

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_raw = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_raw}"))?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let mut auth = if production {
            AuthConfig::default()
        } else {
            AuthConfig::development()
        };
        match var("SESSION_SECRET") {
            Some(secret) => auth.session_secret = secret,
            None if production => bail!("SESSION_SECRET must be set in production"),
            None => tracing::warn!("SESSION_SECRET not set; using a random secret"),
        }
        match var("PASSWORD_PEPPER") {
            Some(pepper) => auth.password_pepper = pepper,
            None if production => bail!("PASSWORD_PEPPER must be set in production"),
            None => tracing::warn!("PASSWORD_PEPPER not set; passwords are hashed without a pepper"),
        }
        auth.federated = FederatedLoginConfig {
            client_id: var("GOOGLE_CLIENT_ID"),
            redirect_url: var("GOOGLE_REDIRECT_URL"),
        };

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            production,
            admin_password: var("ADMIN_PASSWORD"),
            auth,
        })
    }
}
