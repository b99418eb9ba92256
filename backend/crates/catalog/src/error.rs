//! Catalog Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use loyalty::LoyaltyError;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Unknown or inactive table code
    #[error("Table not found")]
    TableNotFound,

    #[error("Category not found")]
    CategoryNotFound,

    #[error("Product not found")]
    ProductNotFound,

    /// Product create/update names a category that does not exist
    #[error("Unknown category")]
    UnknownCategory,

    /// Table create names a location that does not exist
    #[error("Unknown location")]
    UnknownLocation,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Loyalty(#[from] LoyaltyError),

    /// Validation, role and other kernel-level failures
    #[error(transparent)]
    App(#[from] AppError),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::TableNotFound
            | CatalogError::CategoryNotFound
            | CatalogError::ProductNotFound => ErrorKind::NotFound,
            CatalogError::UnknownCategory | CatalogError::UnknownLocation => ErrorKind::BadRequest,
            CatalogError::Database(_) => ErrorKind::InternalServerError,
            CatalogError::Loyalty(e) => e.kind(),
            CatalogError::App(e) => e.kind(),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => tracing::error!(error = %e, "Catalog database error"),
            CatalogError::Loyalty(e) if e.kind() == ErrorKind::InternalServerError => {
                tracing::error!(error = %e, "Catalog loyalty lookup failed")
            }
            CatalogError::App(e) if e.is_server_error() => {
                tracing::error!(error = ?e, "Catalog internal error")
            }
            _ => tracing::debug!(error = %self, "Catalog request rejected"),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::App(e) => e,
            CatalogError::Database(e) => AppError::from(e),
            CatalogError::Loyalty(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants() {
        let app: AppError = CatalogError::TableNotFound.into();
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.message(), "Table not found");
    }

    #[test]
    fn test_loyalty_error_passes_through() {
        let err = CatalogError::from(LoyaltyError::from(AppError::unauthorized("Unauthorized")));
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
