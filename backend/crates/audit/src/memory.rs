//! In-memory audit sink for tests.

use std::sync::{Arc, Mutex};

use kernel::error::app_error::{AppError, AppResult};

use crate::domain::entry::AuditEntry;
use crate::domain::repository::AuditLog;

#[derive(Clone, Default)]
pub struct InMemoryAuditLog {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl InMemoryAuditLog {
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl AuditLog for InMemoryAuditLog {
    async fn append(&self, entry: &AuditEntry) -> AppResult<()> {
        self.entries
            .lock()
            .map_err(|_| AppError::internal("audit log poisoned"))?
            .push(entry.clone());
        Ok(())
    }
}
