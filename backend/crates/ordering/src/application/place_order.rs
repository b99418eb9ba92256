//! Place Order Use Case
//!
//! Prices the cart against live products and the customer's current badge,
//! then writes the order, its items and the PLACED event atomically.
//! Placement is not idempotent: a retried request creates a second order.

use std::sync::Arc;

use chrono::Utc;
use kernel::context::CurrentUser;
use kernel::id::OrderId;
use kernel::role::UserRole;
use kernel::validation::Validator;
use loyalty::LoyaltyRepository;
use loyalty::application::ResolveBadgeUseCase;

use crate::application::{check_cart, distinct_products};
use crate::domain::event::OrderEvent;
use crate::domain::order::{CartLine, Order, Placement, generate_order_code, snapshot_lines};
use crate::domain::repository::OrderRepository;
use crate::domain::status::OrderStatus;
use crate::error::{OrderError, OrderResult};

/// Attempts at a unique order code before giving up
const CODE_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct PlaceOrderInput {
    pub table_code: String,
    pub notes: Option<String>,
    pub items: Vec<CartLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub order_code: String,
    pub total_after_discount: i64,
}

pub struct PlaceOrderUseCase<R, L>
where
    R: OrderRepository,
    L: LoyaltyRepository,
{
    repo: Arc<R>,
    loyalty: Arc<L>,
}

impl<R, L> PlaceOrderUseCase<R, L>
where
    R: OrderRepository,
    L: LoyaltyRepository,
{
    pub fn new(repo: Arc<R>, loyalty: Arc<L>) -> Self {
        Self { repo, loyalty }
    }

    pub async fn execute(&self, customer: &CurrentUser, input: PlaceOrderInput) -> OrderResult<PlacedOrder> {
        if customer.role != UserRole::Customer {
            return Err(OrderError::CustomersOnly);
        }

        let table_code = input.table_code.trim();
        let mut v = Validator::new();
        v.min_chars("tableCode", table_code, 1);
        check_cart(&mut v, &input.items);
        v.finish("Invalid order")?;

        let table = self
            .repo
            .find_table(table_code)
            .await?
            .filter(|t| t.is_active)
            .ok_or(OrderError::TableNotFound)?;

        let products = self
            .repo
            .active_products(&distinct_products(&input.items))
            .await?;
        let id = OrderId::new();
        let items = snapshot_lines(id, &input.items, &products).ok_or(OrderError::ProductUnavailable)?;

        let standing = ResolveBadgeUseCase::new(self.loyalty.clone())
            .execute(&customer.id)
            .await?;

        let mut order = Order::place(
            Placement {
                id,
                table,
                customer_id: customer.id,
                discount_percent: standing.badge.discount_percent,
                notes: input.notes.filter(|n| !n.trim().is_empty()),
                placed_at: Utc::now(),
            },
            &items,
        );
        let event = OrderEvent::status(order.id, OrderStatus::Placed, customer.id);
        let mut attempt = 1;
        loop {
            match self.repo.insert_placed(&order, &items, &event).await {
                Err(OrderError::CodeTaken) if attempt < CODE_ATTEMPTS => {
                    tracing::debug!(order_code = %order.order_code, attempt, "Order code taken, retrying");
                    order.order_code = generate_order_code(order.placed_at);
                    attempt += 1;
                }
                result => break result?,
            }
        }

        tracing::info!(
            order_id = %order.id,
            order_code = %order.order_code,
            customer_id = %customer.id,
            items = items.len(),
            total = order.total_after_discount,
            discount_percent = order.discount_percent_applied,
            "Order placed"
        );

        Ok(PlacedOrder {
            id: order.id,
            order_code: order.order_code,
            total_after_discount: order.total_after_discount,
        })
    }
}
