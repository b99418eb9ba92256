//! Audit Log
//!
//! Append-only trail of administrative mutations. Every catalog, table,
//! user and settings change writes exactly one entry; nothing in the
//! application reads, edits or deletes them.

pub mod domain;
pub mod infra;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

pub use domain::entry::{AuditAction, AuditEntry};
pub use domain::repository::{AuditLog, LocalAuditLog};
pub use infra::postgres::PgAuditLog;
