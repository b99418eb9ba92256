//! Category administration

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, AuditLog};
use kernel::context::CurrentUser;
use kernel::id::CategoryId;
use kernel::pagination::{PageQuery, Paginated};
use kernel::validation::Validator;

use crate::application::check_present;
use crate::domain::category::{Category, CategoryPatch};
use crate::domain::repository::CatalogRepository;
use crate::error::{CatalogError, CatalogResult};

pub const MAX_CATEGORY_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default)]
pub struct CreateCategoryInput {
    pub slug: String,
    pub name_en: String,
    pub name_bn: String,
    pub sort_order: i32,
}

pub struct ManageCategoriesUseCase<R, A>
where
    R: CatalogRepository,
    A: AuditLog,
{
    repo: Arc<R>,
    audit: Arc<A>,
}

impl<R, A> ManageCategoriesUseCase<R, A>
where
    R: CatalogRepository,
    A: AuditLog,
{
    pub fn new(repo: Arc<R>, audit: Arc<A>) -> Self {
        Self { repo, audit }
    }

    pub async fn list(&self, query: PageQuery) -> CatalogResult<Paginated<Category>> {
        self.repo.list_categories(query.resolve(MAX_CATEGORY_PAGE_SIZE)).await
    }

    pub async fn create(&self, actor: &CurrentUser, input: CreateCategoryInput) -> CatalogResult<CategoryId> {
        let mut v = Validator::new();
        v.min_chars("slug", &input.slug, 1)
            .min_chars("name_en", &input.name_en, 1)
            .min_chars("name_bn", &input.name_bn, 1);
        v.finish("Invalid category")?;

        let category = Category::new(input.slug, input.name_en, input.name_bn, input.sort_order);
        self.repo.insert_category(&category).await?;

        let entry = AuditEntry::new(actor.id, AuditAction::Create, "category", category.id)
            .with_payload(&category);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category.id)
    }

    pub async fn update(&self, actor: &CurrentUser, id: &CategoryId, patch: CategoryPatch) -> CatalogResult<()> {
        let mut v = Validator::new();
        check_present(&mut v, "slug", patch.slug.as_deref());
        check_present(&mut v, "name_en", patch.name_en.as_deref());
        check_present(&mut v, "name_bn", patch.name_bn.as_deref());
        v.finish("Invalid update")?;

        if !self.repo.update_category(id, &patch).await? {
            return Err(CatalogError::CategoryNotFound);
        }

        let entry = AuditEntry::new(actor.id, AuditAction::Update, "category", id).with_payload(&patch);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, category_id = %id, "Category updated");
        Ok(())
    }

    /// Soft delete; products keep their category.
    pub async fn deactivate(&self, actor: &CurrentUser, id: &CategoryId) -> CatalogResult<()> {
        if !self.repo.deactivate_category(id).await? {
            return Err(CatalogError::CategoryNotFound);
        }

        let entry = AuditEntry::new(actor.id, AuditAction::Deactivate, "category", id);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, category_id = %id, "Category deactivated");
        Ok(())
    }
}
