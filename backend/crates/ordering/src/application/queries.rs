//! Order reads for customers and staff

use std::sync::Arc;

use kernel::context::CurrentUser;
use kernel::error::app_error::AppError;
use kernel::id::OrderId;
use kernel::role::UserRole;

use crate::domain::order::{Order, OrderItem};
use crate::domain::repository::OrderRepository;
use crate::domain::status::OrderStatus;
use crate::error::{OrderError, OrderResult};

/// Orders returned by the history endpoint.
pub const HISTORY_LIMIT: i64 = 50;

/// An order together with its line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub table_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub view: OrderView,
    pub reviewed: bool,
}

/// Parse `?status=A,B`; blank means the kitchen's incoming queue.
pub fn parse_statuses(raw: Option<&str>) -> OrderResult<Vec<OrderStatus>> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(vec![OrderStatus::Placed]);
    };
    let mut statuses = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let status = part
            .parse::<OrderStatus>()
            .map_err(|e| AppError::bad_request("Invalid status filter").with_details(e.to_string().into()))?;
        if !statuses.contains(&status) {
            statuses.push(status);
        }
    }
    Ok(statuses)
}

pub struct OrderQueriesUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> OrderQueriesUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The table's newest open order, if any.
    pub async fn current(&self, table_code: Option<&str>) -> OrderResult<Option<OrderView>> {
        let table_code = table_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::bad_request("Missing tableCode"))?;
        let table = self
            .repo
            .find_table(table_code)
            .await?
            .ok_or(OrderError::TableNotFound)?;

        let Some(order) = self.repo.current_for_table(&table.id).await? else {
            return Ok(None);
        };
        let items = self.repo.items_for(&[order.id]).await?;
        Ok(Some(OrderView {
            order,
            items,
            table_label: Some(table.label),
        }))
    }

    pub async fn history(&self, customer: &CurrentUser) -> OrderResult<Vec<Order>> {
        if customer.role != UserRole::Customer {
            return Err(AppError::forbidden("Only customers can view history").into());
        }
        self.repo.history(&customer.id, HISTORY_LIMIT).await
    }

    /// Customers may only read their own orders; staff read any.
    pub async fn detail(&self, viewer: &CurrentUser, id: &OrderId) -> OrderResult<OrderDetail> {
        let order = self.repo.find(id).await?.ok_or(OrderError::OrderNotFound)?;
        if viewer.role == UserRole::Customer && order.customer_id != viewer.id {
            return Err(AppError::forbidden("Forbidden").into());
        }

        let items = self.repo.items_for(&[order.id]).await?;
        let reviewed = self.repo.review_exists(&order.id).await?;
        Ok(OrderDetail {
            view: OrderView {
                order,
                items,
                table_label: None,
            },
            reviewed,
        })
    }

    /// Staff queue, oldest first, each order with its items.
    pub async fn queue(&self, statuses: &[OrderStatus]) -> OrderResult<Vec<OrderView>> {
        let queued = self.repo.queue(statuses).await?;
        if queued.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<OrderId> = queued.iter().map(|q| q.order.id).collect();
        let mut items = self.repo.items_for(&ids).await?;

        Ok(queued
            .into_iter()
            .map(|q| {
                let (mine, rest): (Vec<_>, Vec<_>) = items.drain(..).partition(|i| i.order_id == q.order.id);
                items = rest;
                OrderView {
                    order: q.order,
                    items: mine,
                    table_label: Some(q.table_label),
                }
            })
            .collect())
    }
}

