use chrono::{DateTime, Utc};
use kernel::id::{AuditLogId, UserId};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Deactivate,
}

impl AuditAction {
    pub const fn code(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Deactivate => "DEACTIVATE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: AuditLogId,
    pub actor_user_id: UserId,
    pub action: AuditAction,
    pub entity_type: &'static str,
    pub entity_id: String,
    pub payload: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        actor_user_id: UserId,
        action: AuditAction,
        entity_type: &'static str,
        entity_id: impl ToString,
    ) -> Self {
        Self {
            id: AuditLogId::new(),
            actor_user_id,
            action,
            entity_type,
            entity_id: entity_id.to_string(),
            payload: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the request body that caused the mutation.
    ///
    /// Serialization failures leave the payload empty rather than
    /// dropping the entry.
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) if !value.is_null() => self.payload = Some(value),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, entity_type = self.entity_type, "Audit payload not serializable"),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_with_payload() {
        let actor = UserId::new();
        let entry = AuditEntry::new(actor, AuditAction::Create, "category", "c-1")
            .with_payload(&serde_json::json!({ "slug": "coffee" }));
        assert_eq!(entry.actor_user_id, actor);
        assert_eq!(entry.action.code(), "CREATE");
        assert_eq!(entry.entity_id, "c-1");
        assert_eq!(entry.payload.unwrap()["slug"], "coffee");
    }

    #[test]
    fn test_null_payload_is_omitted() {
        let entry = AuditEntry::new(UserId::new(), AuditAction::Deactivate, "product", "p-1")
            .with_payload(&Option::<String>::None);
        assert!(entry.payload.is_none());
    }
}
