//! Auth Middleware
//!
//! Resolves the session cookie on every request and attaches the caller as
//! a [`RequestContext`]. Handlers decide whether anonymous access is allowed.

use axum::body::Body;
use axum::extract::{ConnectInfo, FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use kernel::context::RequestContext;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionRepository, UserRepository};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Attach the session's user, or an anonymous context, to the request.
///
/// Store failures are logged and the request continues anonymously.
pub async fn resolve_session<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), state.config.session_cookie_name());

    let ctx = match token {
        Some(token) => {
            let use_case =
                CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
            match use_case.resolve(&token).await {
                Ok(Some(user)) => RequestContext::authenticated(user.to_current_user()),
                Ok(None) => RequestContext::anonymous(),
                Err(e) => {
                    tracing::warn!(error = %e, "Session lookup failed; continuing anonymously");
                    RequestContext::anonymous()
                }
            }
        }
        None => RequestContext::anonymous(),
    };

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

/// Rate-limit key for the caller (client IP or `"unknown"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());
        Ok(Self(platform::client::client_key(&parts.headers, direct)))
    }
}
