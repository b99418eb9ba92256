//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

use audit::AuditLog;
use kernel::context::RequestContext;
use kernel::error::app_error::AppError;
use kernel::extract::{JsonBody, QueryParams};
use kernel::id::{CategoryId, ProductId, TableId};
use kernel::pagination::{PageQuery, Paginated};
use kernel::role::UserRole;
use loyalty::LoyaltyRepository;

use crate::application::{
    BrowseProductsUseCase, ManageCategoriesUseCase, ManageProductsUseCase, ManageTablesUseCase,
    MenuUseCase, SalesReportUseCase, ThemeSettingsUseCase,
};
use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::report::SalesRange;
use crate::domain::repository::{
    CatalogRepository, SalesReportRepository, SettingsRepository, VenueRepository,
};
use crate::error::CatalogResult;
use crate::presentation::dto::{
    BestItemsResponse, CreateCategoryRequest, CreateProductRequest, CreateTableRequest,
    CreatedResponse, ItemsResponse, LocationsResponse, MenuQuery, MenuResponse, OkResponse,
    ProductsQuery, ProductsResponse, SalesQuery, SalesResponse, TablesResponse, ThemeRequest,
    ThemeResponse, UpdateCategoryRequest, UpdateProductRequest, UpdateTableRequest,
};

/// Every repository the catalog routes read or write
pub trait CatalogStore:
    CatalogRepository
    + VenueRepository
    + SettingsRepository
    + SalesReportRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> CatalogStore for T where
    T: CatalogRepository
        + VenueRepository
        + SettingsRepository
        + SalesReportRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R, L, A>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub loyalty: Arc<L>,
    pub audit: Arc<A>,
}

// ============================================================================
// Public
// ============================================================================

/// GET /api/menu?tableCode=
pub async fn menu<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    QueryParams(query): QueryParams<MenuQuery>,
) -> CatalogResult<Json<MenuResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let menu = MenuUseCase::new(state.repo.clone(), state.loyalty.clone())
        .execute(query.table_code.as_deref(), ctx.user())
        .await?;

    Ok(Json(menu.into()))
}

/// GET /api/products
pub async fn products<R, L, A>(
    State(state): State<CatalogAppState<R, L, A>>,
    QueryParams(query): QueryParams<ProductsQuery>,
) -> CatalogResult<Json<ProductsResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let products = BrowseProductsUseCase::new(state.repo.clone())
        .execute(&query.into())
        .await?;

    Ok(Json(ProductsResponse { products }))
}

/// GET /api/settings/theme
pub async fn get_theme<R, L, A>(
    State(state): State<CatalogAppState<R, L, A>>,
) -> CatalogResult<Json<ThemeResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let theme = ThemeSettingsUseCase::new(state.repo.clone(), state.audit.clone())
        .get()
        .await?;

    Ok(Json(ThemeResponse { theme }))
}

// ============================================================================
// Admin: settings
// ============================================================================

/// GET /api/admin/settings/theme
pub async fn admin_get_theme<R, L, A>(
    ctx: RequestContext,
    state: State<CatalogAppState<R, L, A>>,
) -> CatalogResult<Json<ThemeResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;
    get_theme(state).await
}

/// POST /api/admin/settings/theme
pub async fn set_theme<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    JsonBody(req): JsonBody<ThemeRequest>,
) -> CatalogResult<Json<OkResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    ThemeSettingsUseCase::new(state.repo.clone(), state.audit.clone())
        .set(actor, &req.theme)
        .await?;

    Ok(Json(OkResponse::ok()))
}

// ============================================================================
// Admin: categories
// ============================================================================

/// GET /api/admin/categories
pub async fn list_categories<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    QueryParams(query): QueryParams<PageQuery>,
) -> CatalogResult<Json<Paginated<Category>>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let page = ManageCategoriesUseCase::new(state.repo.clone(), state.audit.clone())
        .list(query)
        .await?;

    Ok(Json(page))
}

/// POST /api/admin/categories
pub async fn create_category<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    JsonBody(req): JsonBody<CreateCategoryRequest>,
) -> CatalogResult<Json<CreatedResponse<CategoryId>>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let id = ManageCategoriesUseCase::new(state.repo.clone(), state.audit.clone())
        .create(actor, req.into())
        .await?;

    Ok(Json(CreatedResponse { id }))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateCategoryRequest>,
) -> CatalogResult<Json<OkResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;
    let id: CategoryId = id.parse().map_err(AppError::from)?;

    ManageCategoriesUseCase::new(state.repo.clone(), state.audit.clone())
        .update(actor, &id, req.into())
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// DELETE /api/admin/categories/{id}
pub async fn deactivate_category<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<OkResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;
    let id: CategoryId = id.parse().map_err(AppError::from)?;

    ManageCategoriesUseCase::new(state.repo.clone(), state.audit.clone())
        .deactivate(actor, &id)
        .await?;

    Ok(Json(OkResponse::ok()))
}

// ============================================================================
// Admin: products
// ============================================================================

/// GET /api/admin/products
pub async fn list_products<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    QueryParams(query): QueryParams<PageQuery>,
) -> CatalogResult<Json<Paginated<Product>>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let page = ManageProductsUseCase::new(state.repo.clone(), state.audit.clone())
        .list(query)
        .await?;

    Ok(Json(page))
}

/// POST /api/admin/products
pub async fn create_product<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    JsonBody(req): JsonBody<CreateProductRequest>,
) -> CatalogResult<Json<CreatedResponse<ProductId>>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let id = ManageProductsUseCase::new(state.repo.clone(), state.audit.clone())
        .create(actor, req.into())
        .await?;

    Ok(Json(CreatedResponse { id }))
}

/// PUT /api/admin/products/{id}
pub async fn update_product<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateProductRequest>,
) -> CatalogResult<Json<OkResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;
    let id: ProductId = id.parse().map_err(AppError::from)?;

    ManageProductsUseCase::new(state.repo.clone(), state.audit.clone())
        .update(actor, &id, req.into())
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// DELETE /api/admin/products/{id}
pub async fn deactivate_product<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<OkResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;
    let id: ProductId = id.parse().map_err(AppError::from)?;

    ManageProductsUseCase::new(state.repo.clone(), state.audit.clone())
        .deactivate(actor, &id)
        .await?;

    Ok(Json(OkResponse::ok()))
}

// ============================================================================
// Admin: locations and tables
// ============================================================================

/// GET /api/admin/locations
pub async fn list_locations<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
) -> CatalogResult<Json<LocationsResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let items = ManageTablesUseCase::new(state.repo.clone(), state.audit.clone())
        .locations()
        .await?;

    Ok(Json(ItemsResponse { items }))
}

/// GET /api/admin/tables
pub async fn list_tables<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
) -> CatalogResult<Json<TablesResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let items = ManageTablesUseCase::new(state.repo.clone(), state.audit.clone())
        .tables()
        .await?;

    Ok(Json(ItemsResponse { items }))
}

/// POST /api/admin/tables
pub async fn create_table<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    JsonBody(req): JsonBody<CreateTableRequest>,
) -> CatalogResult<Json<CreatedResponse<TableId>>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let id = ManageTablesUseCase::new(state.repo.clone(), state.audit.clone())
        .create(actor, req.into())
        .await?;

    Ok(Json(CreatedResponse { id }))
}

/// PUT /api/admin/tables/{id}
pub async fn update_table<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateTableRequest>,
) -> CatalogResult<Json<OkResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;
    let id: TableId = id.parse().map_err(AppError::from)?;

    ManageTablesUseCase::new(state.repo.clone(), state.audit.clone())
        .update(actor, &id, req.into())
        .await?;

    Ok(Json(OkResponse::ok()))
}

// ============================================================================
// Admin: reports
// ============================================================================

/// GET /api/admin/reports/sales?range=daily|monthly|yearly
pub async fn sales_report<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
    QueryParams(query): QueryParams<SalesQuery>,
) -> CatalogResult<Json<SalesResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let rows = SalesReportUseCase::new(state.repo.clone())
        .sales(SalesRange::parse(query.range.as_deref()))
        .await?;

    Ok(Json(SalesResponse { rows }))
}

/// GET /api/admin/reports/best-items
pub async fn best_items_report<R, L, A>(
    ctx: RequestContext,
    State(state): State<CatalogAppState<R, L, A>>,
) -> CatalogResult<Json<BestItemsResponse>>
where
    R: CatalogStore,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let items = SalesReportUseCase::new(state.repo.clone()).best_items().await?;

    Ok(Json(BestItemsResponse { items }))
}
