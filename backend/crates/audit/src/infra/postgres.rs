//! PostgreSQL audit log

use kernel::error::app_error::AppResult;
use sqlx::{PgExecutor, PgPool};

use crate::domain::entry::AuditEntry;
use crate::domain::repository::AuditLog;

#[derive(Clone)]
pub struct PgAuditLog {
    pool: PgPool,
}

impl PgAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert `entry` on any executor, so callers can include it in their own
/// transaction.
pub async fn insert_entry<'e, E>(executor: E, entry: &AuditEntry) -> AppResult<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO audit_logs (
            id,
            actor_user_id,
            action,
            entity_type,
            entity_id,
            payload_json,
            created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(entry.id.as_uuid())
    .bind(entry.actor_user_id.as_uuid())
    .bind(entry.action.code())
    .bind(entry.entity_type)
    .bind(&entry.entity_id)
    .bind(&entry.payload)
    .bind(entry.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

impl AuditLog for PgAuditLog {
    async fn append(&self, entry: &AuditEntry) -> AppResult<()> {
        insert_entry(&self.pool, entry).await?;
        tracing::debug!(
            action = %entry.action,
            entity_type = entry.entity_type,
            entity_id = %entry.entity_id,
            "Audit entry written"
        );
        Ok(())
    }
}
