use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ReviewId, UserId};
use serde::Serialize;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 10;

/// A customer's single review of a served order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub order_id: OrderId,
    pub customer_id: UserId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(order_id: OrderId, customer_id: UserId, rating: i32, comment: Option<String>) -> Self {
        Self {
            id: ReviewId::new(),
            order_id,
            customer_id,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }
}
