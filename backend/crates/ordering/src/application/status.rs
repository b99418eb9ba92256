//! Staff status actions

use std::sync::Arc;

use chrono::Utc;
use kernel::context::CurrentUser;
use kernel::id::OrderId;
use kernel::validation::Validator;

use crate::domain::event::OrderEvent;
use crate::domain::order::{MAX_ETA_MINUTES, MIN_ETA_MINUTES};
use crate::domain::repository::OrderRepository;
use crate::domain::status::OrderStatus;
use crate::error::{OrderError, OrderResult};

pub struct OrderStatusUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> OrderStatusUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// PLACED → ACCEPTED with an ETA in minutes.
    pub async fn accept(&self, actor: &CurrentUser, id: &OrderId, eta_minutes: i32) -> OrderResult<()> {
        let mut v = Validator::new();
        v.range(
            "etaMinutes",
            eta_minutes.into(),
            MIN_ETA_MINUTES.into(),
            MAX_ETA_MINUTES.into(),
        );
        v.finish("Invalid request")?;

        let mut order = self.repo.find(id).await?.ok_or(OrderError::OrderNotFound)?;
        let now = Utc::now();
        let transition = order.accept(eta_minutes, now).ok_or(OrderError::CannotAccept)?;

        let event = OrderEvent::status(order.id, OrderStatus::Accepted, actor.id)
            .with_payload(serde_json::json!({ "etaMinutes": eta_minutes }));
        if !self.repo.save_transition(&order, &transition, &event).await? {
            return Err(OrderError::Stale);
        }

        tracing::info!(actor = %actor.id, order_id = %order.id, eta_minutes, "Order accepted");
        Ok(())
    }

    /// PREPARING, READY, SERVED or CANCELLED. Serving credits the
    /// customer's points the first time only.
    pub async fn set_status(&self, actor: &CurrentUser, id: &OrderId, status: &str) -> OrderResult<OrderStatus> {
        let target = status
            .parse::<OrderStatus>()
            .ok()
            .filter(OrderStatus::is_staff_settable)
            .ok_or_else(|| {
                let mut v = Validator::new();
                v.check("status", false, "Must be one of PREPARING, READY, SERVED, CANCELLED");
                v.into_error("Invalid request")
            })?;

        let mut order = self.repo.find(id).await?.ok_or(OrderError::OrderNotFound)?;
        let transition = order
            .transition(target, Utc::now())
            .ok_or(OrderError::InvalidTransition)?;

        let mut event = OrderEvent::status(order.id, target, actor.id);
        if let Some(points) = transition.credit {
            event = event.with_payload(serde_json::json!({ "pointsCredited": points }));
        }
        if !self.repo.save_transition(&order, &transition, &event).await? {
            return Err(OrderError::Stale);
        }

        tracing::info!(
            actor = %actor.id,
            order_id = %order.id,
            from = %transition.from,
            to = %target,
            credited = transition.credit.unwrap_or(0),
            "Order status changed"
        );
        Ok(target)
    }
}
