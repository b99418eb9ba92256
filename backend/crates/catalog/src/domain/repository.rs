//! Repository Traits

use kernel::id::{CategoryId, LocationId, ProductId, TableId, UserId};
use kernel::pagination::{Page, Paginated};

use crate::domain::category::{Category, CategoryPatch};
use crate::domain::product::{Product, ProductFilter, ProductPatch};
use crate::domain::report::{BestItem, SalesRange, SalesRow};
use crate::domain::theme::Theme;
use crate::domain::venue::{Location, Table, TablePatch, TableSite};
use crate::error::CatalogResult;

/// Categories and products
#[trait_variant::make(CatalogRepository: Send)]
pub trait LocalCatalogRepository {
    /// Active categories by sort order.
    async fn active_categories(&self) -> CatalogResult<Vec<Category>>;

    /// All categories by sort order.
    async fn list_categories(&self, page: Page) -> CatalogResult<Paginated<Category>>;

    async fn category_exists(&self, id: &CategoryId) -> CatalogResult<bool>;

    async fn insert_category(&self, category: &Category) -> CatalogResult<()>;

    /// Returns `false` when no category has `id`.
    async fn update_category(&self, id: &CategoryId, patch: &CategoryPatch) -> CatalogResult<bool>;

    async fn deactivate_category(&self, id: &CategoryId) -> CatalogResult<bool>;

    /// Active products in menu order.
    async fn menu_products(&self) -> CatalogResult<Vec<Product>>;

    async fn search_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>>;

    /// Distinct active products from the customer's orders, most recently
    /// ordered first.
    async fn previous_products(&self, customer_id: &UserId, limit: i64) -> CatalogResult<Vec<Product>>;

    /// All products, newest first.
    async fn list_products(&self, page: Page) -> CatalogResult<Paginated<Product>>;

    async fn insert_product(&self, product: &Product) -> CatalogResult<()>;

    async fn update_product(&self, id: &ProductId, patch: &ProductPatch) -> CatalogResult<bool>;

    async fn deactivate_product(&self, id: &ProductId) -> CatalogResult<bool>;
}

/// Locations and tables
#[trait_variant::make(VenueRepository: Send)]
pub trait LocalVenueRepository {
    async fn find_active_table(&self, code: &str) -> CatalogResult<Option<TableSite>>;

    /// Newest first.
    async fn list_locations(&self) -> CatalogResult<Vec<Location>>;

    async fn location_exists(&self, id: &LocationId) -> CatalogResult<bool>;

    /// By label.
    async fn list_tables(&self) -> CatalogResult<Vec<Table>>;

    async fn insert_table(&self, table: &Table) -> CatalogResult<()>;

    async fn update_table(&self, id: &TableId, patch: &TablePatch) -> CatalogResult<bool>;
}

/// Key/value settings
#[trait_variant::make(SettingsRepository: Send)]
pub trait LocalSettingsRepository {
    /// The default theme when unset.
    async fn theme(&self) -> CatalogResult<Theme>;

    async fn set_theme(&self, theme: Theme) -> CatalogResult<()>;
}

/// Aggregates over served orders
#[trait_variant::make(SalesReportRepository: Send)]
pub trait LocalSalesReportRepository {
    /// Served revenue per period, latest period first.
    async fn sales_by_period(&self, range: SalesRange, limit: i64) -> CatalogResult<Vec<SalesRow>>;

    /// Served quantity per product name, best first.
    async fn best_items(&self, limit: i64) -> CatalogResult<Vec<BestItem>>;
}
