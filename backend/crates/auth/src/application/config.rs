//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;

use chrono::Duration;
use platform::cookie::CookieConfig;
use platform::rate_limit::{LoginRateLimiter, RateLimitConfig};

/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "cafe_session";
/// Session lifetime in days
pub const SESSION_DAYS: i64 = 45;

/// Federated (Google) sign-in settings; presence only.
#[derive(Debug, Clone, Default)]
pub struct FederatedLoginConfig {
    pub client_id: Option<String>,
    pub redirect_url: Option<String>,
}

impl FederatedLoginConfig {
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.redirect_url.is_some()
    }
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub session_cookie: CookieConfig,
    pub session_ttl: Duration,
    /// Mixed into stored token hashes
    pub session_secret: String,
    /// Application-wide password pepper
    pub password_pepper: String,
    /// Always mark the cookie Secure (production); otherwise only over HTTPS
    pub cookie_secure: bool,
    /// Shared across requests; cloning keeps the same attempt map
    pub login_limiter: LoginRateLimiter,
    pub federated: FederatedLoginConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie: CookieConfig::named(SESSION_COOKIE_NAME),
            session_ttl: Duration::days(SESSION_DAYS),
            session_secret: String::new(),
            password_pepper: String::new(),
            cookie_secure: true,
            login_limiter: LoginRateLimiter::new(RateLimitConfig::default()),
            federated: FederatedLoginConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::generate_token(),
            ..Default::default()
        }
    }

    /// Create config for development (Secure only over HTTPS)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie.name
    }

    pub fn pepper(&self) -> &str {
        &self.password_pepper
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie", &self.session_cookie)
            .field("session_ttl", &self.session_ttl)
            .field("session_secret", &"[REDACTED]")
            .field("password_pepper", &"[REDACTED]")
            .field("cookie_secure", &self.cookie_secure)
            .field("login_limiter", self.login_limiter.config())
            .field("federated", &self.federated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name(), "cafe_session");
        assert_eq!(config.session_ttl, Duration::days(45));
        assert_eq!(config.login_limiter.config().max_attempts, 5);
    }

    #[test]
    fn test_development_has_secret_and_lax_cookie() {
        let config = AuthConfig::development();
        assert_eq!(config.session_secret.len(), 64);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = AuthConfig::development();
        config.password_pepper = "pepper-value".into();
        let out = format!("{config:?}");
        assert!(!out.contains("pepper-value"));
        assert!(!out.contains(&config.session_secret));
    }
}
