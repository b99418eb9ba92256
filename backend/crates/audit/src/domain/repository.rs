//! Repository Traits

use kernel::error::app_error::AppResult;

use crate::domain::entry::AuditEntry;

/// Write-only audit sink.
#[trait_variant::make(AuditLog: Send)]
pub trait LocalAuditLog {
    /// Persist one entry.
    async fn append(&self, entry: &AuditEntry) -> AppResult<()>;
}
