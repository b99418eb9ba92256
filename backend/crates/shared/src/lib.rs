//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the café vocabulary:
//! - Common error types and result aliases
//! - Typed entity IDs
//! - Staff/customer roles and the per-request caller context
//! - Field-level validation errors shared by every endpoint
//! - Page-number pagination for admin listings
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod context;
pub mod id;
pub mod pagination;
pub mod role;
pub mod validation;

#[cfg(feature = "axum")]
pub mod extract;

pub use context::{CurrentUser, RequestContext};
pub use error::app_error::{AppError, AppResult};
pub use error::kind::ErrorKind;
pub use role::UserRole;
