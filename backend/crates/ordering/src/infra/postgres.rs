//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use kernel::id::{LocationId, OrderId, OrderItemId, ProductId, TableId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::event::OrderEvent;
use crate::domain::order::{Order, OrderItem, ProductSnapshot, TableRef, Transition};
use crate::domain::repository::{OrderRepository, QueuedOrder};
use crate::domain::review::Review;
use crate::domain::status::OrderStatus;
use crate::error::{OrderError, OrderResult};

const ORDER_COLUMNS: &str = r#"
    o.id, o.order_code, o.location_id, o.table_id, o.customer_id, o.status,
    o.placed_at, o.accepted_at, o.eta_minutes, o.eta_at, o.served_at,
    o.total_before_discount, o.discount_percent_applied, o.discount_amount,
    o.total_after_discount, o.points_earned, o.points_credited, o.notes
"#;

const ITEM_COLUMNS: &str = r#"
    id, order_id, product_id, product_name_snapshot_en, product_name_snapshot_bn,
    unit_price, qty, line_total
"#;

/// PostgreSQL-backed order repository
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_order_insert_error(err: sqlx::Error) -> OrderError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
        && db_err.constraint() == Some("orders_order_code_key")
    {
        return OrderError::CodeTaken;
    }
    OrderError::Database(err)
}

fn map_review_insert_error(err: sqlx::Error) -> OrderError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return OrderError::AlreadyReviewed;
    }
    OrderError::Database(err)
}

async fn insert_items<'e, E>(executor: E, items: &[OrderItem]) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    let ids: Vec<Uuid> = items.iter().map(|i| i.id.into_uuid()).collect();
    let order_ids: Vec<Uuid> = items.iter().map(|i| i.order_id.into_uuid()).collect();
    let product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id.into_uuid()).collect();
    let names_en: Vec<&str> = items.iter().map(|i| i.product_name_snapshot_en.as_str()).collect();
    let names_bn: Vec<&str> = items.iter().map(|i| i.product_name_snapshot_bn.as_str()).collect();
    let unit_prices: Vec<i64> = items.iter().map(|i| i.unit_price).collect();
    let qtys: Vec<i32> = items.iter().map(|i| i.qty).collect();
    let line_totals: Vec<i64> = items.iter().map(|i| i.line_total).collect();

    sqlx::query(
        r#"
        INSERT INTO order_items (
            id, order_id, product_id, product_name_snapshot_en, product_name_snapshot_bn,
            unit_price, qty, line_total
        )
        SELECT * FROM UNNEST(
            $1::UUID[], $2::UUID[], $3::UUID[], $4::TEXT[], $5::TEXT[],
            $6::BIGINT[], $7::INTEGER[], $8::BIGINT[]
        )
        "#,
    )
    .bind(&ids)
    .bind(&order_ids)
    .bind(&product_ids)
    .bind(&names_en)
    .bind(&names_bn)
    .bind(&unit_prices)
    .bind(&qtys)
    .bind(&line_totals)
    .execute(executor)
    .await?;

    Ok(())
}

async fn insert_event<'e, E>(executor: E, event: &OrderEvent) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO order_events (
            id, order_id, actor_user_id, event_type, payload_json, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(event.id.as_uuid())
    .bind(event.order_id.as_uuid())
    .bind(event.actor_user_id.as_uuid())
    .bind(&event.event_type)
    .bind(&event.payload)
    .bind(event.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

impl OrderRepository for PgOrderRepository {
    async fn find_table(&self, code: &str) -> OrderResult<Option<TableRef>> {
        let row = sqlx::query_as::<_, TableRow>(
            "SELECT id, location_id, label, is_active FROM cafe_tables WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TableRow::into_table))
    }

    async fn active_products(&self, ids: &[ProductId]) -> OrderResult<Vec<ProductSnapshot>> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name_en, name_bn, price FROM products WHERE id = ANY($1) AND is_active = TRUE",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_snapshot).collect())
    }

    async fn insert_placed(&self, order: &Order, items: &[OrderItem], event: &OrderEvent) -> OrderResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_code, location_id, table_id, customer_id, status, placed_at,
                total_before_discount, discount_percent_applied, discount_amount,
                total_after_discount, points_earned, points_credited, notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(&order.order_code)
        .bind(order.location_id.as_uuid())
        .bind(order.table_id.as_uuid())
        .bind(order.customer_id.as_uuid())
        .bind(order.status.code())
        .bind(order.placed_at)
        .bind(order.total_before_discount)
        .bind(order.discount_percent_applied)
        .bind(order.discount_amount)
        .bind(order.total_after_discount)
        .bind(order.points_earned)
        .bind(order.points_credited)
        .bind(order.notes.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(map_order_insert_error)?;

        insert_items(&mut *tx, items).await?;
        insert_event(&mut *tx, event).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find(&self, id: &OrderId) -> OrderResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders o WHERE o.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(OrderRow::into_order).transpose()
    }

    async fn items_for(&self, ids: &[OrderId]) -> OrderResult<Vec<OrderItem>> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1) ORDER BY order_id, product_name_snapshot_en"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_item).collect())
    }

    async fn save_transition(&self, order: &Order, transition: &Transition, event: &OrderEvent) -> OrderResult<bool> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE orders SET
                status = $2,
                accepted_at = $3,
                eta_minutes = $4,
                eta_at = $5,
                served_at = $6,
                points_credited = $7
            WHERE id = $1 AND status = $8 AND points_credited = $9 AND points_earned = $10
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.status.code())
        .bind(order.accepted_at)
        .bind(order.eta_minutes)
        .bind(order.eta_at)
        .bind(order.served_at)
        .bind(order.points_credited)
        .bind(transition.from.code())
        .bind(transition.was_credited)
        .bind(transition.points_earned)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            return Ok(false);
        }

        if let Some(points) = transition.credit {
            sqlx::query(
                r#"
                INSERT INTO user_points (user_id, points_total, updated_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id) DO UPDATE SET
                    points_total = user_points.points_total + EXCLUDED.points_total,
                    updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(order.customer_id.as_uuid())
            .bind(points)
            .bind(event.created_at)
            .execute(&mut *tx)
            .await?;
        }

        insert_event(&mut *tx, event).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn replace_items(
        &self,
        order: &Order,
        expected: OrderStatus,
        items: &[OrderItem],
        event: &OrderEvent,
    ) -> OrderResult<bool> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE orders SET
                total_before_discount = $2,
                discount_amount = $3,
                total_after_discount = $4,
                points_earned = $5
            WHERE id = $1 AND status = $6
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.total_before_discount)
        .bind(order.discount_amount)
        .bind(order.total_after_discount)
        .bind(order.points_earned)
        .bind(expected.code())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order.id.as_uuid())
            .execute(&mut *tx)
            .await?;
        insert_items(&mut *tx, items).await?;
        insert_event(&mut *tx, event).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn current_for_table(&self, table_id: &TableId) -> OrderResult<Option<Order>> {
        let open: Vec<&str> = OrderStatus::OPEN.iter().map(OrderStatus::code).collect();
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM orders o
            WHERE o.table_id = $1 AND o.status = ANY($2)
            ORDER BY o.placed_at DESC
            LIMIT 1
            "#
        ))
        .bind(table_id.as_uuid())
        .bind(&open)
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    async fn history(&self, customer_id: &UserId, limit: i64) -> OrderResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders o WHERE o.customer_id = $1 ORDER BY o.placed_at DESC LIMIT $2"
        ))
        .bind(customer_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    async fn queue(&self, statuses: &[OrderStatus]) -> OrderResult<Vec<QueuedOrder>> {
        let codes: Vec<&str> = statuses.iter().map(OrderStatus::code).collect();
        let rows = sqlx::query_as::<_, QueuedRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}, t.label AS table_label
            FROM orders o
            JOIN cafe_tables t ON t.id = o.table_id
            WHERE o.status = ANY($1)
            ORDER BY o.placed_at ASC
            "#
        ))
        .bind(&codes)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(QueuedOrder {
                    table_label: row.table_label,
                    order: row.order.into_order()?,
                })
            })
            .collect()
    }

    async fn review_exists(&self, order_id: &OrderId) -> OrderResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM reviews WHERE order_id = $1)")
            .bind(order_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_review(&self, review: &Review) -> OrderResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, order_id, customer_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(review.order_id.as_uuid())
        .bind(review.customer_id.as_uuid())
        .bind(review.rating)
        .bind(review.comment.as_deref())
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_review_insert_error)?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TableRow {
    id: Uuid,
    location_id: Uuid,
    label: String,
    is_active: bool,
}

impl TableRow {
    fn into_table(self) -> TableRef {
        TableRef {
            id: TableId::from_uuid(self.id),
            location_id: LocationId::from_uuid(self.location_id),
            label: self.label,
            is_active: self.is_active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name_en: String,
    name_bn: String,
    price: i64,
}

impl ProductRow {
    fn into_snapshot(self) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::from_uuid(self.id),
            name_en: self.name_en,
            name_bn: self.name_bn,
            price: self.price,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_code: String,
    location_id: Uuid,
    table_id: Uuid,
    customer_id: Uuid,
    status: String,
    placed_at: DateTime<Utc>,
    accepted_at: Option<DateTime<Utc>>,
    eta_minutes: Option<i32>,
    eta_at: Option<DateTime<Utc>>,
    served_at: Option<DateTime<Utc>>,
    total_before_discount: i64,
    discount_percent_applied: i32,
    discount_amount: i64,
    total_after_discount: i64,
    points_earned: i64,
    points_credited: bool,
    notes: Option<String>,
}

impl OrderRow {
    fn into_order(self) -> OrderResult<Order> {
        let status = OrderStatus::from_code(&self.status).ok_or_else(|| {
            AppError::internal(format!("Unknown order status in store: {}", self.status))
        })?;

        Ok(Order {
            id: OrderId::from_uuid(self.id),
            order_code: self.order_code,
            location_id: LocationId::from_uuid(self.location_id),
            table_id: TableId::from_uuid(self.table_id),
            customer_id: UserId::from_uuid(self.customer_id),
            status,
            placed_at: self.placed_at,
            accepted_at: self.accepted_at,
            eta_minutes: self.eta_minutes,
            eta_at: self.eta_at,
            served_at: self.served_at,
            total_before_discount: self.total_before_discount,
            discount_percent_applied: self.discount_percent_applied,
            discount_amount: self.discount_amount,
            total_after_discount: self.total_after_discount,
            points_earned: self.points_earned,
            points_credited: self.points_credited,
            notes: self.notes,
        })
    }
}

#[derive(sqlx::FromRow)]
struct QueuedRow {
    #[sqlx(flatten)]
    order: OrderRow,
    table_label: String,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    product_name_snapshot_en: String,
    product_name_snapshot_bn: String,
    unit_price: i64,
    qty: i32,
    line_total: i64,
}

impl ItemRow {
    fn into_item(self) -> OrderItem {
        OrderItem {
            id: OrderItemId::from_uuid(self.id),
            order_id: OrderId::from_uuid(self.order_id),
            product_id: ProductId::from_uuid(self.product_id),
            product_name_snapshot_en: self.product_name_snapshot_en,
            product_name_snapshot_bn: self.product_name_snapshot_bn,
            unit_price: self.unit_price,
            qty: self.qty,
            line_total: self.line_total,
        }
    }
}
