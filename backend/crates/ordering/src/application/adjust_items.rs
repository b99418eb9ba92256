//! Adjust Items Use Case
//!
//! Staff may replace an open order's lines (a customer changed their mind at
//! the counter). Lines are re-snapshotted from live products and repriced
//! with the discount the order was placed with.

use std::sync::Arc;

use kernel::context::CurrentUser;
use kernel::id::OrderId;
use kernel::validation::Validator;

use crate::application::{check_cart, distinct_products};
use crate::application::queries::OrderView;
use crate::domain::event::{ITEMS_ADJUSTED, OrderEvent};
use crate::domain::order::{CartLine, snapshot_lines};
use crate::domain::repository::OrderRepository;
use crate::error::{OrderError, OrderResult};

pub struct AdjustItemsUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> AdjustItemsUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, actor: &CurrentUser, id: &OrderId, lines: Vec<CartLine>) -> OrderResult<OrderView> {
        let mut v = Validator::new();
        check_cart(&mut v, &lines);
        v.finish("Invalid items")?;

        let mut order = self.repo.find(id).await?.ok_or(OrderError::OrderNotFound)?;
        if !order.is_adjustable() {
            return Err(OrderError::NotAdjustable);
        }

        let products = self.repo.active_products(&distinct_products(&lines)).await?;
        let items = snapshot_lines(order.id, &lines, &products).ok_or(OrderError::ProductUnavailable)?;

        let before = order.total_after_discount;
        order.reprice(&items);

        let event = OrderEvent::new(order.id, ITEMS_ADJUSTED, actor.id).with_payload(serde_json::json!({
            "items": lines.len(),
            "totalBefore": before,
            "totalAfter": order.total_after_discount,
        }));
        if !self.repo.replace_items(&order, order.status, &items, &event).await? {
            return Err(OrderError::Stale);
        }

        tracing::info!(
            actor = %actor.id,
            order_id = %order.id,
            from_total = before,
            to_total = order.total_after_discount,
            "Order items adjusted"
        );

        Ok(OrderView {
            order,
            items,
            table_label: None,
        })
    }
}
