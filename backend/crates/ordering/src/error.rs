//! Ordering Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use loyalty::LoyaltyError;
use thiserror::Error;

pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found")]
    OrderNotFound,

    /// Unknown table code, or inactive when placing
    #[error("Table not found")]
    TableNotFound,

    #[error("Only customers can place orders")]
    CustomersOnly,

    /// A cart line names an unknown or inactive product
    #[error("Invalid product")]
    ProductUnavailable,

    #[error("Order cannot be accepted")]
    CannotAccept,

    #[error("Invalid status transition")]
    InvalidTransition,

    #[error("Order can no longer be adjusted")]
    NotAdjustable,

    /// Another request changed the order between read and write
    #[error("Order was updated concurrently")]
    Stale,

    #[error("Order not served yet")]
    NotServed,

    #[error("Review already submitted")]
    AlreadyReviewed,

    /// Generated order code already used; placement retries with a new one
    #[error("Order code collision")]
    CodeTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Loyalty(#[from] LoyaltyError),

    /// Validation, role and other kernel-level failures
    #[error(transparent)]
    App(#[from] AppError),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::OrderNotFound | OrderError::TableNotFound => ErrorKind::NotFound,
            OrderError::CustomersOnly => ErrorKind::Forbidden,
            OrderError::ProductUnavailable
            | OrderError::CannotAccept
            | OrderError::InvalidTransition
            | OrderError::NotAdjustable
            | OrderError::NotServed => ErrorKind::BadRequest,
            OrderError::Stale | OrderError::AlreadyReviewed => ErrorKind::Conflict,
            OrderError::CodeTaken | OrderError::Database(_) => ErrorKind::InternalServerError,
            OrderError::Loyalty(e) => e.kind(),
            OrderError::App(e) => e.kind(),
        }
    }

    fn log(&self) {
        match self {
            OrderError::Database(e) => tracing::error!(error = %e, "Ordering database error"),
            OrderError::Loyalty(e) if e.kind() == ErrorKind::InternalServerError => {
                tracing::error!(error = %e, "Ordering badge lookup failed")
            }
            OrderError::App(e) if e.is_server_error() => {
                tracing::error!(error = ?e, "Ordering internal error")
            }
            OrderError::Stale => tracing::warn!("Order write lost a race"),
            OrderError::CodeTaken => tracing::error!("Order code collisions exhausted retries"),
            _ => tracing::debug!(error = %self, "Order request rejected"),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::App(e) => e,
            OrderError::Database(e) => AppError::from(e),
            OrderError::Loyalty(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
