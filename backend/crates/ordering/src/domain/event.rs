//! Order events
//!
//! One append-only row per state change, written in the same transaction as
//! the change itself.

use chrono::{DateTime, Utc};
use kernel::id::{OrderEventId, OrderId, UserId};
use serde::Serialize;

use crate::domain::status::OrderStatus;

pub const ITEMS_ADJUSTED: &str = "ITEMS_ADJUSTED";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderEvent {
    pub id: OrderEventId,
    pub order_id: OrderId,
    /// A status code, or `ITEMS_ADJUSTED`
    pub event_type: String,
    pub actor_user_id: UserId,
    pub payload: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl OrderEvent {
    pub fn new(order_id: OrderId, event_type: impl Into<String>, actor_user_id: UserId) -> Self {
        Self {
            id: OrderEventId::new(),
            order_id,
            event_type: event_type.into(),
            actor_user_id,
            payload: None,
            created_at: Utc::now(),
        }
    }

    pub fn status(order_id: OrderId, status: OrderStatus, actor_user_id: UserId) -> Self {
        Self::new(order_id, status.code(), actor_user_id)
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}
