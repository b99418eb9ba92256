//! Orders and their line items
//!
//! Totals, the discount percent and every line's name and price are
//! snapshotted when the order is placed. Later catalog or badge changes never
//! touch an existing order.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{LocationId, OrderId, OrderItemId, ProductId, TableId, UserId};
use loyalty::{OrderTotals, PricedLine, order_totals};
use rand::Rng;
use serde::Serialize;

use crate::domain::status::OrderStatus;

pub const MIN_QTY: i32 = 1;
pub const MAX_QTY: i32 = 20;
pub const MIN_ETA_MINUTES: i32 = 1;
pub const MAX_ETA_MINUTES: i32 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub order_code: String,
    pub location_id: LocationId,
    pub table_id: TableId,
    pub customer_id: UserId,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub eta_minutes: Option<i32>,
    pub eta_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
    pub total_before_discount: i64,
    pub discount_percent_applied: i32,
    pub discount_amount: i64,
    pub total_after_discount: i64,
    pub points_earned: i64,
    /// Set once the customer has been credited `points_earned`
    pub points_credited: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name_snapshot_en: String,
    pub product_name_snapshot_bn: String,
    pub unit_price: i64,
    pub qty: i32,
    pub line_total: i64,
}

/// One requested product and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub qty: i32,
}

/// Name and price of an active product at the time it is ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name_en: String,
    pub name_bn: String,
    pub price: i64,
}

/// The table an order is placed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub id: TableId,
    pub location_id: LocationId,
    pub label: String,
    pub is_active: bool,
}

/// State an order had before a status change, used as a write guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: OrderStatus,
    pub was_credited: bool,
    /// `points_earned` as read; an item adjustment since then fails the write
    pub points_earned: i64,
    /// Points to add to the customer's total in the same write
    pub credit: Option<i64>,
}

impl Transition {
    fn from_order(order: &Order) -> Self {
        Self {
            from: order.status,
            was_credited: order.points_credited,
            points_earned: order.points_earned,
            credit: None,
        }
    }
}

/// `ORD-YYYYMMDD-NNNN` with a random four-digit suffix.
pub fn generate_order_code(at: DateTime<Utc>) -> String {
    let suffix: u16 = rand::rng().random_range(0..10_000);
    format!("ORD-{}-{suffix:04}", at.format("%Y%m%d"))
}

/// Snapshot every cart line against `products`.
///
/// `None` when any line names a product that is not in `products`.
pub fn snapshot_lines(order_id: OrderId, lines: &[CartLine], products: &[ProductSnapshot]) -> Option<Vec<OrderItem>> {
    lines
        .iter()
        .map(|line| {
            let product = products.iter().find(|p| p.id == line.product_id)?;
            Some(OrderItem {
                id: OrderItemId::new(),
                order_id,
                product_id: product.id,
                product_name_snapshot_en: product.name_en.clone(),
                product_name_snapshot_bn: product.name_bn.clone(),
                unit_price: product.price,
                qty: line.qty,
                line_total: product.price * i64::from(line.qty),
            })
        })
        .collect()
}

pub fn totals_for(items: &[OrderItem], discount_percent: i32) -> OrderTotals {
    let lines: Vec<PricedLine> = items
        .iter()
        .map(|item| PricedLine {
            unit_price: item.unit_price,
            qty: i64::from(item.qty),
        })
        .collect();
    order_totals(&lines, discount_percent)
}

/// What a placement needs besides the priced items.
#[derive(Debug, Clone)]
pub struct Placement {
    pub id: OrderId,
    pub table: TableRef,
    pub customer_id: UserId,
    pub discount_percent: i32,
    pub notes: Option<String>,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// New PLACED order. One point is earned per unit paid.
    pub fn place(placement: Placement, items: &[OrderItem]) -> Self {
        let totals = totals_for(items, placement.discount_percent);
        Self {
            id: placement.id,
            order_code: generate_order_code(placement.placed_at),
            location_id: placement.table.location_id,
            table_id: placement.table.id,
            customer_id: placement.customer_id,
            status: OrderStatus::Placed,
            placed_at: placement.placed_at,
            accepted_at: None,
            eta_minutes: None,
            eta_at: None,
            served_at: None,
            total_before_discount: totals.subtotal,
            discount_percent_applied: placement.discount_percent,
            discount_amount: totals.discount_amount,
            total_after_discount: totals.total_after,
            points_earned: totals.total_after,
            points_credited: false,
            notes: placement.notes,
        }
    }

    /// PLACED → ACCEPTED with an ETA. `None` from any other status.
    pub fn accept(&mut self, eta_minutes: i32, at: DateTime<Utc>) -> Option<Transition> {
        if self.status != OrderStatus::Placed {
            return None;
        }
        let transition = Transition::from_order(self);
        self.status = OrderStatus::Accepted;
        self.accepted_at = Some(at);
        self.eta_minutes = Some(eta_minutes);
        self.eta_at = Some(at + Duration::minutes(i64::from(eta_minutes)));
        Some(transition)
    }

    /// Move to `to`, filling the timestamps that status implies.
    ///
    /// Serving credits `points_earned` only if it was never credited before.
    pub fn transition(&mut self, to: OrderStatus, at: DateTime<Utc>) -> Option<Transition> {
        if to == OrderStatus::Accepted || !self.status.can_transition_to(to) {
            return None;
        }
        let mut transition = Transition::from_order(self);
        self.status = to;
        match to {
            OrderStatus::Preparing => {
                self.accepted_at.get_or_insert(at);
            }
            OrderStatus::Ready => {
                self.eta_at.get_or_insert(at);
            }
            OrderStatus::Served => {
                self.served_at.get_or_insert(at);
                if !self.points_credited {
                    self.points_credited = true;
                    transition.credit = Some(self.points_earned);
                }
            }
            _ => {}
        }
        Some(transition)
    }

    /// Items may be replaced until the order is served or cancelled.
    pub fn is_adjustable(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Reprice against new items, keeping the discount snapshotted at
    /// placement.
    pub fn reprice(&mut self, items: &[OrderItem]) {
        let totals = totals_for(items, self.discount_percent_applied);
        self.total_before_discount = totals.subtotal;
        self.discount_amount = totals.discount_amount;
        self.total_after_discount = totals.total_after;
        self.points_earned = totals.total_after;
    }
}
