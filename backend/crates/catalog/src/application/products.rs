//! Product browsing and administration

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, AuditLog};
use chrono::Utc;
use kernel::context::CurrentUser;
use kernel::id::{CategoryId, ProductId};
use kernel::pagination::{PageQuery, Paginated};
use kernel::validation::Validator;

use crate::application::check_present;
use crate::domain::product::{Product, ProductFilter, ProductPatch};
use crate::domain::repository::CatalogRepository;
use crate::error::{CatalogError, CatalogResult};

pub const MAX_PRODUCT_PAGE_SIZE: i64 = 200;
pub const MIN_PRICE: i64 = 1;

pub struct BrowseProductsUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> BrowseProductsUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        self.repo.search_products(filter).await
    }
}

#[derive(Debug, Default)]
pub struct CreateProductInput {
    pub category_id: Option<CategoryId>,
    pub slug: String,
    pub name_en: String,
    pub name_bn: String,
    pub description_en: String,
    pub description_bn: String,
    pub price: Option<i64>,
    pub is_active: Option<bool>,
    pub is_featured: bool,
    pub is_trending: bool,
    pub is_hot: bool,
    pub media_image_url: Option<String>,
    pub media_video_url: Option<String>,
}

pub struct ManageProductsUseCase<R, A>
where
    R: CatalogRepository,
    A: AuditLog,
{
    repo: Arc<R>,
    audit: Arc<A>,
}

impl<R, A> ManageProductsUseCase<R, A>
where
    R: CatalogRepository,
    A: AuditLog,
{
    pub fn new(repo: Arc<R>, audit: Arc<A>) -> Self {
        Self { repo, audit }
    }

    pub async fn list(&self, query: PageQuery) -> CatalogResult<Paginated<Product>> {
        self.repo.list_products(query.resolve(MAX_PRODUCT_PAGE_SIZE)).await
    }

    pub async fn create(&self, actor: &CurrentUser, input: CreateProductInput) -> CatalogResult<ProductId> {
        let mut v = Validator::new();
        v.check("category_id", input.category_id.is_some(), "Required")
            .min_chars("slug", &input.slug, 1)
            .min_chars("name_en", &input.name_en, 1)
            .min_chars("name_bn", &input.name_bn, 1)
            .min_chars("description_en", &input.description_en, 1)
            .min_chars("description_bn", &input.description_bn, 1)
            .check(
                "price",
                input.price.is_some_and(|p| p >= MIN_PRICE),
                "Must be at least 1",
            );
        v.finish("Invalid product")?;
        let (Some(category_id), Some(price)) = (input.category_id, input.price) else {
            return Err(kernel::AppError::bad_request("Invalid product").into());
        };

        if !self.repo.category_exists(&category_id).await? {
            return Err(CatalogError::UnknownCategory);
        }

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            category_id,
            slug: input.slug,
            name_en: input.name_en,
            name_bn: input.name_bn,
            description_en: input.description_en,
            description_bn: input.description_bn,
            price,
            is_active: input.is_active.unwrap_or(true),
            is_featured: input.is_featured,
            is_trending: input.is_trending,
            is_hot: input.is_hot,
            media_image_url: input.media_image_url,
            media_video_url: input.media_video_url,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert_product(&product).await?;

        let entry = AuditEntry::new(actor.id, AuditAction::Create, "product", product.id)
            .with_payload(&product);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, product_id = %product.id, price = product.price, "Product created");
        Ok(product.id)
    }

    pub async fn update(&self, actor: &CurrentUser, id: &ProductId, patch: ProductPatch) -> CatalogResult<()> {
        let mut v = Validator::new();
        check_present(&mut v, "slug", patch.slug.as_deref());
        check_present(&mut v, "name_en", patch.name_en.as_deref());
        check_present(&mut v, "name_bn", patch.name_bn.as_deref());
        check_present(&mut v, "description_en", patch.description_en.as_deref());
        check_present(&mut v, "description_bn", patch.description_bn.as_deref());
        if let Some(price) = patch.price {
            v.check("price", price >= MIN_PRICE, "Must be at least 1");
        }
        v.finish("Invalid update")?;

        if let Some(category_id) = &patch.category_id
            && !self.repo.category_exists(category_id).await?
        {
            return Err(CatalogError::UnknownCategory);
        }

        if !self.repo.update_product(id, &patch).await? {
            return Err(CatalogError::ProductNotFound);
        }

        let entry = AuditEntry::new(actor.id, AuditAction::Update, "product", id).with_payload(&patch);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, product_id = %id, "Product updated");
        Ok(())
    }

    /// Soft delete; existing orders keep their snapshots.
    pub async fn deactivate(&self, actor: &CurrentUser, id: &ProductId) -> CatalogResult<()> {
        if !self.repo.deactivate_product(id).await? {
            return Err(CatalogError::ProductNotFound);
        }

        let entry = AuditEntry::new(actor.id, AuditAction::Deactivate, "product", id);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, product_id = %id, "Product deactivated");
        Ok(())
    }
}
