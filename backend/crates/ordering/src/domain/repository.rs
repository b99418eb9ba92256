//! Repository Traits

use kernel::id::{OrderId, ProductId, TableId, UserId};

use crate::domain::event::OrderEvent;
use crate::domain::order::{Order, OrderItem, ProductSnapshot, TableRef, Transition};
use crate::domain::review::Review;
use crate::domain::status::OrderStatus;
use crate::error::OrderResult;

/// An order with its table label, as the staff queue shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedOrder {
    pub order: Order,
    pub table_label: String,
}

#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    async fn find_table(&self, code: &str) -> OrderResult<Option<TableRef>>;

    /// Snapshots of the active products among `ids`. Inactive or unknown
    /// ids are simply absent.
    async fn active_products(&self, ids: &[ProductId]) -> OrderResult<Vec<ProductSnapshot>>;

    /// Order, items and the PLACED event in one transaction.
    async fn insert_placed(&self, order: &Order, items: &[OrderItem], event: &OrderEvent) -> OrderResult<()>;

    async fn find(&self, id: &OrderId) -> OrderResult<Option<Order>>;

    /// Items of every order in `ids`.
    async fn items_for(&self, ids: &[OrderId]) -> OrderResult<Vec<OrderItem>>;

    /// Persist a status change made by [`Order::accept`] or
    /// [`Order::transition`], crediting points and appending `event` in the
    /// same transaction.
    ///
    /// Returns `false` without writing when the stored order no longer
    /// matches `transition.from`, `transition.was_credited` and
    /// `transition.points_earned`.
    async fn save_transition(&self, order: &Order, transition: &Transition, event: &OrderEvent) -> OrderResult<bool>;

    /// Replace the order's items and totals while it is still in
    /// `expected` status. Returns `false` without writing otherwise.
    async fn replace_items(
        &self,
        order: &Order,
        expected: OrderStatus,
        items: &[OrderItem],
        event: &OrderEvent,
    ) -> OrderResult<bool>;

    /// Newest non-terminal order at the table.
    async fn current_for_table(&self, table_id: &TableId) -> OrderResult<Option<Order>>;

    /// Newest first.
    async fn history(&self, customer_id: &UserId, limit: i64) -> OrderResult<Vec<Order>>;

    /// Orders in any of `statuses`, oldest first.
    async fn queue(&self, statuses: &[OrderStatus]) -> OrderResult<Vec<QueuedOrder>>;

    async fn review_exists(&self, order_id: &OrderId) -> OrderResult<bool>;

    /// Fails with `AlreadyReviewed` when the order already has a review.
    async fn insert_review(&self, review: &Review) -> OrderResult<()>;
}
