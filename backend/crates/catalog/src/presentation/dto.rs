//! Data Transfer Objects

use kernel::id::{CategoryId, LocationId, TableId};
use loyalty::CustomerProfile;
use serde::{Deserialize, Serialize};

use crate::application::{CreateCategoryInput, CreateProductInput, CreateTableInput, Menu};
use crate::domain::category::{Category, CategoryPatch};
use crate::domain::product::{Product, ProductFilter, ProductPatch};
use crate::domain::report::{BestItem, SalesRow};
use crate::domain::theme::Theme;
use crate::domain::venue::{Location, Table, TablePatch};

// ============================================================================
// Menu
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    pub table_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MenuTable {
    pub id: TableId,
    pub code: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct MenuLocation {
    pub id: LocationId,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub table: MenuTable,
    pub location: MenuLocation,
    pub theme: Theme,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub customer: Option<CustomerProfile>,
    pub previous_items: Vec<Product>,
}

impl From<Menu> for MenuResponse {
    fn from(menu: Menu) -> Self {
        Self {
            table: MenuTable {
                id: menu.table.table_id,
                code: menu.table.code,
                label: menu.table.label,
            },
            location: MenuLocation {
                id: menu.table.location_id,
                name: menu.table.location_name,
            },
            theme: menu.theme,
            categories: menu.categories,
            products: menu.products,
            customer: menu.customer,
            previous_items: menu.previous_items,
        }
    }
}

/// `?category=<slug>&hot=1&trending=1`
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub hot: Option<String>,
    pub trending: Option<String>,
}

impl From<ProductsQuery> for ProductFilter {
    fn from(q: ProductsQuery) -> Self {
        Self {
            category: q.category.filter(|c| !c.is_empty()),
            hot_only: q.hot.as_deref() == Some("1"),
            trending_only: q.trending.as_deref() == Some("1"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeRequest {
    pub theme: String,
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

pub type LocationsResponse = ItemsResponse<Location>;
pub type TablesResponse = ItemsResponse<Table>;

#[derive(Debug, Serialize)]
pub struct CreatedResponse<T> {
    pub id: T,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCategoryRequest {
    pub slug: String,
    pub name_en: String,
    pub name_bn: String,
    pub sort_order: i32,
}

impl From<CreateCategoryRequest> for CreateCategoryInput {
    fn from(req: CreateCategoryRequest) -> Self {
        Self {
            slug: req.slug,
            name_en: req.name_en,
            name_bn: req.name_bn,
            sort_order: req.sort_order,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateCategoryRequest {
    pub slug: Option<String>,
    pub name_en: Option<String>,
    pub name_bn: Option<String>,
    pub sort_order: Option<i32>,
}

impl From<UpdateCategoryRequest> for CategoryPatch {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self {
            slug: req.slug,
            name_en: req.name_en,
            name_bn: req.name_bn,
            sort_order: req.sort_order,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateProductRequest {
    pub category_id: Option<CategoryId>,
    pub slug: String,
    pub name_en: String,
    pub name_bn: String,
    pub description_en: String,
    pub description_bn: String,
    #[serde(alias = "price_tk")]
    pub price: Option<i64>,
    pub is_active: Option<bool>,
    pub is_featured: bool,
    pub is_trending: bool,
    pub is_hot: bool,
    pub media_image_url: Option<String>,
    pub media_video_url: Option<String>,
}

impl From<CreateProductRequest> for CreateProductInput {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            category_id: req.category_id,
            slug: req.slug,
            name_en: req.name_en,
            name_bn: req.name_bn,
            description_en: req.description_en,
            description_bn: req.description_bn,
            price: req.price,
            is_active: req.is_active,
            is_featured: req.is_featured,
            is_trending: req.is_trending,
            is_hot: req.is_hot,
            media_image_url: req.media_image_url,
            media_video_url: req.media_video_url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProductRequest {
    pub category_id: Option<CategoryId>,
    pub slug: Option<String>,
    pub name_en: Option<String>,
    pub name_bn: Option<String>,
    pub description_en: Option<String>,
    pub description_bn: Option<String>,
    #[serde(alias = "price_tk")]
    pub price: Option<i64>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_trending: Option<bool>,
    pub is_hot: Option<bool>,
    pub media_image_url: Option<String>,
    pub media_video_url: Option<String>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            category_id: req.category_id,
            slug: req.slug,
            name_en: req.name_en,
            name_bn: req.name_bn,
            description_en: req.description_en,
            description_bn: req.description_bn,
            price: req.price,
            is_active: req.is_active,
            is_featured: req.is_featured,
            is_trending: req.is_trending,
            is_hot: req.is_hot,
            media_image_url: req.media_image_url,
            media_video_url: req.media_video_url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTableRequest {
    pub location_id: Option<LocationId>,
    pub code: String,
    pub label: String,
}

impl From<CreateTableRequest> for CreateTableInput {
    fn from(req: CreateTableRequest) -> Self {
        Self {
            location_id: req.location_id,
            code: req.code,
            label: req.label,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTableRequest {
    pub code: Option<String>,
    pub label: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateTableRequest> for TablePatch {
    fn from(req: UpdateTableRequest) -> Self {
        Self {
            code: req.code,
            label: req.label,
            is_active: req.is_active,
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    pub range: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SalesResponse {
    pub rows: Vec<SalesRow>,
}

#[derive(Debug, Serialize)]
pub struct BestItemsResponse {
    pub items: Vec<BestItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_query_flags() {
        let filter = ProductFilter::from(ProductsQuery {
            category: Some(String::new()),
            hot: Some("1".into()),
            trending: Some("true".into()),
        });
        assert_eq!(filter.category, None);
        assert!(filter.hot_only);
        assert!(!filter.trending_only);
    }

    #[test]
    fn test_price_accepts_legacy_name() {
        let req: CreateProductRequest = serde_json::from_str(r#"{"slug":"tea","price_tk":120}"#).unwrap();
        assert_eq!(req.price, Some(120));
        assert!(req.category_id.is_none());
        assert!(!req.is_hot);
    }
}
