//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Phone already registered")]
    PhoneTaken,

    /// Unknown identifier, inactive account or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Current password mismatch on change-password
    #[error("Invalid password")]
    InvalidPassword,

    #[error("Too many attempts. Please wait.")]
    RateLimited,

    #[error("User not found")]
    UserNotFound,

    #[error("Google auth not configured")]
    FederatedNotConfigured,

    #[error("Not implemented")]
    FederatedNotImplemented,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Validation, role and other kernel-level failures
    #[error(transparent)]
    App(#[from] AppError),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::PhoneTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::InvalidPassword => ErrorKind::Unauthorized,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::FederatedNotConfigured | AuthError::FederatedNotImplemented => {
                ErrorKind::NotImplemented
            }
            AuthError::Database(_) => ErrorKind::InternalServerError,
            AuthError::App(e) => e.kind(),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::App(e) if e.is_server_error() => {
                tracing::error!(error = ?e, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RateLimited => {
                tracing::warn!("Login attempt while rate limited");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::App(e) => e,
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<loyalty::LoyaltyError> for AuthError {
    fn from(err: loyalty::LoyaltyError) -> Self {
        AuthError::App(err.into())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AuthError::PhoneTaken, 409),
            (AuthError::InvalidCredentials, 401),
            (AuthError::InvalidPassword, 401),
            (AuthError::RateLimited, 429),
            (AuthError::FederatedNotConfigured, 501),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_messages_are_client_facing() {
        let app = AppError::from(AuthError::RateLimited);
        assert_eq!(app.message(), "Too many attempts. Please wait.");
    }

    #[test]
    fn test_app_error_passes_through() {
        let err = AuthError::from(AppError::forbidden("Forbidden"));
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(AppError::from(err).message(), "Forbidden");
    }
}
