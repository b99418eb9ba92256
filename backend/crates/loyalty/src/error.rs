//! Loyalty Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type LoyaltyResult<T> = Result<T, LoyaltyError>;

#[derive(Debug, Error)]
pub enum LoyaltyError {
    /// Discount update names a badge key that does not exist
    #[error("Unknown badge: {0}")]
    UnknownBadge(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Validation, role and other kernel-level failures
    #[error(transparent)]
    App(#[from] AppError),
}

impl LoyaltyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoyaltyError::UnknownBadge(_) => ErrorKind::BadRequest,
            LoyaltyError::Database(_) => ErrorKind::InternalServerError,
            LoyaltyError::App(e) => e.kind(),
        }
    }

    fn log(&self) {
        match self {
            LoyaltyError::Database(e) => tracing::error!(error = %e, "Loyalty database error"),
            LoyaltyError::App(e) if e.is_server_error() => {
                tracing::error!(error = ?e, "Loyalty internal error")
            }
            _ => tracing::debug!(error = %self, "Loyalty request rejected"),
        }
    }
}

impl From<LoyaltyError> for AppError {
    fn from(err: LoyaltyError) -> Self {
        match err {
            LoyaltyError::App(e) => e,
            LoyaltyError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for LoyaltyError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_keeps_kind() {
        let err: LoyaltyError = AppError::forbidden("Forbidden").into();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(AppError::from(err).message(), "Forbidden");
    }

    #[test]
    fn test_unknown_badge_is_bad_request() {
        let app: AppError = LoyaltyError::UnknownBadge("GOLD".into()).into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.message(), "Unknown badge: GOLD");
    }
}
