//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, LocationId, ProductId, TableId, UserId};
use kernel::pagination::{Page, Paginated};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::category::{Category, CategoryPatch};
use crate::domain::product::{Product, ProductFilter, ProductPatch};
use crate::domain::report::{BestItem, SalesRange, SalesRow};
use crate::domain::repository::{
    CatalogRepository, SalesReportRepository, SettingsRepository, VenueRepository,
};
use crate::domain::theme::{THEME_SETTING_KEY, Theme};
use crate::domain::venue::{Location, Table, TablePatch, TableSite};
use crate::error::CatalogResult;

const CATEGORY_COLUMNS: &str = "id, slug, name_en, name_bn, sort_order, is_active, created_at, updated_at";

const PRODUCT_COLUMNS: &str = r#"
    id, category_id, slug, name_en, name_bn, description_en, description_bn,
    price, is_active, is_featured, is_trending, is_hot,
    media_image_url, media_video_url, created_at, updated_at
"#;

const MENU_ORDER: &str = "is_featured DESC, is_trending DESC, is_hot DESC, created_at DESC";

/// PostgreSQL-backed catalog, venue, settings and sales-report repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for PgCatalogRepository {
    async fn active_categories(&self) -> CatalogResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE is_active = TRUE ORDER BY sort_order ASC, name_en ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn list_categories(&self, page: Page) -> CatalogResult<Paginated<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY sort_order ASC, name_en ASC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(Paginated::new(
            rows.into_iter().map(CategoryRow::into_category).collect(),
            total,
        ))
    }

    async fn category_exists(&self, id: &CategoryId) -> CatalogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_category(&self, category: &Category) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (
                id, slug, name_en, name_bn, sort_order, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.slug)
        .bind(&category.name_en)
        .bind(&category.name_bn)
        .bind(category.sort_order)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_category(&self, id: &CategoryId, patch: &CategoryPatch) -> CatalogResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE categories SET
                slug = COALESCE($2, slug),
                name_en = COALESCE($3, name_en),
                name_bn = COALESCE($4, name_bn),
                sort_order = COALESCE($5, sort_order),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(&patch.slug)
        .bind(&patch.name_en)
        .bind(&patch.name_bn)
        .bind(patch.sort_order)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn deactivate_category(&self, id: &CategoryId) -> CatalogResult<bool> {
        let affected = sqlx::query("UPDATE categories SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn menu_products(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = TRUE ORDER BY {MENU_ORDER}"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn search_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE is_active = TRUE
              AND ($1::TEXT IS NULL OR category_id = (SELECT c.id FROM categories c WHERE c.slug = $1))
              AND (NOT $2 OR is_hot)
              AND (NOT $3 OR is_trending)
            ORDER BY {MENU_ORDER}
            "#
        ))
        .bind(&filter.category)
        .bind(filter.hot_only)
        .bind(filter.trending_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn previous_products(&self, customer_id: &UserId, limit: i64) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            JOIN (
                SELECT oi.product_id, MAX(o.placed_at) AS last_ordered
                FROM orders o
                JOIN order_items oi ON oi.order_id = o.id
                WHERE o.customer_id = $1
                GROUP BY oi.product_id
            ) recent ON recent.product_id = products.id
            WHERE is_active = TRUE
            ORDER BY recent.last_ordered DESC
            LIMIT $2
            "#
        ))
        .bind(customer_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn list_products(&self, page: Page) -> CatalogResult<Paginated<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(Paginated::new(
            rows.into_iter().map(ProductRow::into_product).collect(),
            total,
        ))
    }

    async fn insert_product(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, category_id, slug, name_en, name_bn, description_en, description_bn,
                price, is_active, is_featured, is_trending, is_hot,
                media_image_url, media_video_url, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(product.category_id.as_uuid())
        .bind(&product.slug)
        .bind(&product.name_en)
        .bind(&product.name_bn)
        .bind(&product.description_en)
        .bind(&product.description_bn)
        .bind(product.price)
        .bind(product.is_active)
        .bind(product.is_featured)
        .bind(product.is_trending)
        .bind(product.is_hot)
        .bind(&product.media_image_url)
        .bind(&product.media_video_url)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_product(&self, id: &ProductId, patch: &ProductPatch) -> CatalogResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE products SET
                category_id = COALESCE($2, category_id),
                slug = COALESCE($3, slug),
                name_en = COALESCE($4, name_en),
                name_bn = COALESCE($5, name_bn),
                description_en = COALESCE($6, description_en),
                description_bn = COALESCE($7, description_bn),
                price = COALESCE($8, price),
                is_active = COALESCE($9, is_active),
                is_featured = COALESCE($10, is_featured),
                is_trending = COALESCE($11, is_trending),
                is_hot = COALESCE($12, is_hot),
                media_image_url = COALESCE($13, media_image_url),
                media_video_url = COALESCE($14, media_video_url),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.category_id.map(CategoryId::into_uuid))
        .bind(&patch.slug)
        .bind(&patch.name_en)
        .bind(&patch.name_bn)
        .bind(&patch.description_en)
        .bind(&patch.description_bn)
        .bind(patch.price)
        .bind(patch.is_active)
        .bind(patch.is_featured)
        .bind(patch.is_trending)
        .bind(patch.is_hot)
        .bind(&patch.media_image_url)
        .bind(&patch.media_video_url)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn deactivate_product(&self, id: &ProductId) -> CatalogResult<bool> {
        let affected = sqlx::query("UPDATE products SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

impl VenueRepository for PgCatalogRepository {
    async fn find_active_table(&self, code: &str) -> CatalogResult<Option<TableSite>> {
        let row = sqlx::query_as::<_, TableSiteRow>(
            r#"
            SELECT t.id, t.code, t.label, t.location_id, l.name AS location_name
            FROM cafe_tables t
            JOIN locations l ON l.id = t.location_id
            WHERE t.code = $1 AND t.is_active = TRUE
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TableSiteRow::into_site))
    }

    async fn list_locations(&self) -> CatalogResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT id, name, address, is_active, created_at FROM locations ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LocationRow::into_location).collect())
    }

    async fn location_exists(&self, id: &LocationId) -> CatalogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn list_tables(&self) -> CatalogResult<Vec<Table>> {
        let rows = sqlx::query_as::<_, TableRow>(
            "SELECT id, location_id, code, label, is_active, created_at FROM cafe_tables ORDER BY label ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TableRow::into_table).collect())
    }

    async fn insert_table(&self, table: &Table) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cafe_tables (id, location_id, code, label, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(table.id.as_uuid())
        .bind(table.location_id.as_uuid())
        .bind(&table.code)
        .bind(&table.label)
        .bind(table.is_active)
        .bind(table.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_table(&self, id: &TableId, patch: &TablePatch) -> CatalogResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE cafe_tables SET
                code = COALESCE($2, code),
                label = COALESCE($3, label),
                is_active = COALESCE($4, is_active)
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(&patch.code)
        .bind(&patch.label)
        .bind(patch.is_active)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}

impl SettingsRepository for PgCatalogRepository {
    async fn theme(&self) -> CatalogResult<Theme> {
        let value = sqlx::query_scalar::<_, serde_json::Value>("SELECT value_json FROM settings WHERE key = $1")
            .bind(THEME_SETTING_KEY)
            .fetch_optional(&self.pool)
            .await?;

        Ok(Theme::from_setting(value.as_ref()))
    }

    async fn set_theme(&self, theme: Theme) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value_json, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE
            SET value_json = EXCLUDED.value_json, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(THEME_SETTING_KEY)
        .bind(theme.to_setting())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl SalesReportRepository for PgCatalogRepository {
    async fn sales_by_period(&self, range: SalesRange, limit: i64) -> CatalogResult<Vec<SalesRow>> {
        let rows = sqlx::query_as::<_, SalesRowRecord>(
            r#"
            SELECT
                to_char(served_at AT TIME ZONE 'UTC', $1) AS period,
                SUM(total_after_discount)::BIGINT AS total
            FROM orders
            WHERE status = 'SERVED' AND served_at IS NOT NULL
            GROUP BY period
            ORDER BY period DESC
            LIMIT $2
            "#,
        )
        .bind(range.pg_format())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SalesRow {
                period: r.period,
                total: r.total,
            })
            .collect())
    }

    async fn best_items(&self, limit: i64) -> CatalogResult<Vec<BestItem>> {
        let rows = sqlx::query_as::<_, BestItemRecord>(
            r#"
            SELECT oi.product_name_snapshot_en AS name, SUM(oi.qty)::BIGINT AS qty
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE o.status = 'SERVED'
            GROUP BY oi.product_name_snapshot_en
            ORDER BY qty DESC, name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| BestItem {
                name: r.name,
                qty: r.qty,
            })
            .collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    slug: String,
    name_en: String,
    name_bn: String,
    sort_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: CategoryId::from_uuid(self.id),
            slug: self.slug,
            name_en: self.name_en,
            name_bn: self.name_bn,
            sort_order: self.sort_order,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    category_id: Uuid,
    slug: String,
    name_en: String,
    name_bn: String,
    description_en: String,
    description_bn: String,
    price: i64,
    is_active: bool,
    is_featured: bool,
    is_trending: bool,
    is_hot: bool,
    media_image_url: Option<String>,
    media_video_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::from_uuid(self.id),
            category_id: CategoryId::from_uuid(self.category_id),
            slug: self.slug,
            name_en: self.name_en,
            name_bn: self.name_bn,
            description_en: self.description_en,
            description_bn: self.description_bn,
            price: self.price,
            is_active: self.is_active,
            is_featured: self.is_featured,
            is_trending: self.is_trending,
            is_hot: self.is_hot,
            media_image_url: self.media_image_url,
            media_video_url: self.media_video_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TableSiteRow {
    id: Uuid,
    code: String,
    label: String,
    location_id: Uuid,
    location_name: String,
}

impl TableSiteRow {
    fn into_site(self) -> TableSite {
        TableSite {
            table_id: TableId::from_uuid(self.id),
            code: self.code,
            label: self.label,
            location_id: LocationId::from_uuid(self.location_id),
            location_name: self.location_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LocationRow {
    id: Uuid,
    name: String,
    address: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl LocationRow {
    fn into_location(self) -> Location {
        Location {
            id: LocationId::from_uuid(self.id),
            name: self.name,
            address: self.address,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TableRow {
    id: Uuid,
    location_id: Uuid,
    code: String,
    label: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TableRow {
    fn into_table(self) -> Table {
        Table {
            id: TableId::from_uuid(self.id),
            location_id: LocationId::from_uuid(self.location_id),
            code: self.code,
            label: self.label,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SalesRowRecord {
    period: String,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct BestItemRecord {
    name: String,
    qty: i64,
}
