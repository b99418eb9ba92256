//! Use-case tests against an in-memory catalog

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use chrono::{Duration, Utc};
    use kernel::context::CurrentUser;
    use kernel::id::{CategoryId, LocationId, ProductId, TableId, UserId};
    use kernel::pagination::{Page, Paginated};
    use kernel::role::UserRole;

    use crate::domain::category::{Category, CategoryPatch};
    use crate::domain::product::{Product, ProductFilter, ProductPatch, sort_for_menu};
    use crate::domain::report::{BestItem, SalesRange, SalesRow};
    use crate::domain::repository::{
        CatalogRepository, SalesReportRepository, SettingsRepository, VenueRepository,
    };
    use crate::domain::theme::Theme;
    use crate::domain::venue::{Location, Table, TablePatch, TableSite};
    use crate::error::CatalogResult;

    #[derive(Clone, Default)]
    pub struct InMemoryCatalog {
        categories: Arc<Mutex<Vec<Category>>>,
        products: Arc<Mutex<Vec<Product>>>,
        locations: Arc<Mutex<Vec<Location>>>,
        tables: Arc<Mutex<Vec<Table>>>,
        theme: Arc<Mutex<Option<Theme>>>,
        /// (customer, product, minutes ago)
        ordered: Arc<Mutex<Vec<(UserId, ProductId, i64)>>>,
        sales: Arc<Mutex<Vec<SalesRow>>>,
    }

    impl InMemoryCatalog {
        pub fn add_location(&self, name: &str) -> LocationId {
            let location = Location {
                id: LocationId::new(),
                name: name.to_string(),
                address: None,
                is_active: true,
                created_at: Utc::now(),
            };
            let id = location.id;
            self.locations.lock().unwrap().push(location);
            id
        }

        pub fn add_table(&self, location_id: LocationId, code: &str) -> TableId {
            let table = Table::new(location_id, code.to_string(), format!("Table {code}"));
            let id = table.id;
            self.tables.lock().unwrap().push(table);
            id
        }

        pub fn add_category(&self, slug: &str, sort_order: i32) -> CategoryId {
            let category = Category::new(slug.to_string(), slug.to_string(), slug.to_string(), sort_order);
            let id = category.id;
            self.categories.lock().unwrap().push(category);
            id
        }

        pub fn add_product(&self, category_id: CategoryId, slug: &str, flags: (bool, bool, bool), age_minutes: i64) -> ProductId {
            let created = Utc::now() - Duration::minutes(age_minutes);
            let (is_featured, is_trending, is_hot) = flags;
            let product = Product {
                id: ProductId::new(),
                category_id,
                slug: slug.to_string(),
                name_en: slug.to_string(),
                name_bn: slug.to_string(),
                description_en: "desc".to_string(),
                description_bn: "desc".to_string(),
                price: 250,
                is_active: true,
                is_featured,
                is_trending,
                is_hot,
                media_image_url: None,
                media_video_url: None,
                created_at: created,
                updated_at: created,
            };
            let id = product.id;
            self.products.lock().unwrap().push(product);
            id
        }

        pub fn record_order(&self, customer: UserId, product: ProductId, minutes_ago: i64) {
            self.ordered.lock().unwrap().push((customer, product, minutes_ago));
        }

        pub fn add_sales(&self, period: &str, total: i64) {
            self.sales.lock().unwrap().push(SalesRow {
                period: period.to_string(),
                total,
            });
        }

        pub fn category(&self, id: CategoryId) -> Option<Category> {
            self.categories.lock().unwrap().iter().find(|c| c.id == id).cloned()
        }

        pub fn product(&self, id: ProductId) -> Option<Product> {
            self.products.lock().unwrap().iter().find(|p| p.id == id).cloned()
        }

        pub fn table(&self, id: TableId) -> Option<Table> {
            self.tables.lock().unwrap().iter().find(|t| t.id == id).cloned()
        }

        fn slug_of(&self, id: &CategoryId) -> Option<String> {
            self.categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == *id)
                .map(|c| c.slug.clone())
        }
    }

    fn paginate<T: Clone>(all: &[T], page: Page) -> Paginated<T> {
        let items = all
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Paginated::new(items, all.len() as i64)
    }

    impl CatalogRepository for InMemoryCatalog {
        async fn active_categories(&self) -> CatalogResult<Vec<Category>> {
            let mut all: Vec<_> = self
                .categories
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.is_active)
                .cloned()
                .collect();
            all.sort_by_key(|c| c.sort_order);
            Ok(all)
        }

        async fn list_categories(&self, page: Page) -> CatalogResult<Paginated<Category>> {
            let mut all = self.categories.lock().unwrap().clone();
            all.sort_by_key(|c| c.sort_order);
            Ok(paginate(&all, page))
        }

        async fn category_exists(&self, id: &CategoryId) -> CatalogResult<bool> {
            Ok(self.categories.lock().unwrap().iter().any(|c| c.id == *id))
        }

        async fn insert_category(&self, category: &Category) -> CatalogResult<()> {
            self.categories.lock().unwrap().push(category.clone());
            Ok(())
        }

        async fn update_category(&self, id: &CategoryId, patch: &CategoryPatch) -> CatalogResult<bool> {
            let mut categories = self.categories.lock().unwrap();
            Ok(match categories.iter_mut().find(|c| c.id == *id) {
                Some(c) => {
                    patch.apply(c);
                    true
                }
                None => false,
            })
        }

        async fn deactivate_category(&self, id: &CategoryId) -> CatalogResult<bool> {
            let mut categories = self.categories.lock().unwrap();
            Ok(match categories.iter_mut().find(|c| c.id == *id) {
                Some(c) => {
                    c.is_active = false;
                    true
                }
                None => false,
            })
        }

        async fn menu_products(&self) -> CatalogResult<Vec<Product>> {
            let mut all: Vec<_> = self
                .products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.is_active)
                .cloned()
                .collect();
            sort_for_menu(&mut all);
            Ok(all)
        }

        async fn search_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
            let products = self.products.lock().unwrap().clone();
            let mut found: Vec<_> = products
                .into_iter()
                .filter(|p| {
                    let slug = self.slug_of(&p.category_id);
                    filter.matches(p, slug.as_deref())
                })
                .collect();
            sort_for_menu(&mut found);
            Ok(found)
        }

        async fn previous_products(&self, customer_id: &UserId, limit: i64) -> CatalogResult<Vec<Product>> {
            let mut ordered: Vec<_> = self
                .ordered
                .lock()
                .unwrap()
                .iter()
                .filter(|(c, _, _)| c == customer_id)
                .map(|(_, p, ago)| (*p, *ago))
                .collect();
            ordered.sort_by_key(|(_, ago)| *ago);

            let mut seen = Vec::new();
            for (product_id, _) in ordered {
                if seen.iter().any(|p: &Product| p.id == product_id) {
                    continue;
                }
                if let Some(p) = self.product(product_id).filter(|p| p.is_active) {
                    seen.push(p);
                }
            }
            seen.truncate(limit as usize);
            Ok(seen)
        }

        async fn list_products(&self, page: Page) -> CatalogResult<Paginated<Product>> {
            let mut all = self.products.lock().unwrap().clone();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(paginate(&all, page))
        }

        async fn insert_product(&self, product: &Product) -> CatalogResult<()> {
            self.products.lock().unwrap().push(product.clone());
            Ok(())
        }

        async fn update_product(&self, id: &ProductId, patch: &ProductPatch) -> CatalogResult<bool> {
            let mut products = self.products.lock().unwrap();
            Ok(match products.iter_mut().find(|p| p.id == *id) {
                Some(p) => {
                    patch.apply(p);
                    true
                }
                None => false,
            })
        }

        async fn deactivate_product(&self, id: &ProductId) -> CatalogResult<bool> {
            let mut products = self.products.lock().unwrap();
            Ok(match products.iter_mut().find(|p| p.id == *id) {
                Some(p) => {
                    p.is_active = false;
                    true
                }
                None => false,
            })
        }
    }

    impl VenueRepository for InMemoryCatalog {
        async fn find_active_table(&self, code: &str) -> CatalogResult<Option<TableSite>> {
            let tables = self.tables.lock().unwrap();
            let locations = self.locations.lock().unwrap();
            Ok(tables
                .iter()
                .filter(|t| t.is_active && t.code == code)
                .find_map(|t| {
                    let location = locations.iter().find(|l| l.id == t.location_id)?;
                    Some(TableSite {
                        table_id: t.id,
                        code: t.code.clone(),
                        label: t.label.clone(),
                        location_id: location.id,
                        location_name: location.name.clone(),
                    })
                }))
        }

        async fn list_locations(&self) -> CatalogResult<Vec<Location>> {
            Ok(self.locations.lock().unwrap().clone())
        }

        async fn location_exists(&self, id: &LocationId) -> CatalogResult<bool> {
            Ok(self.locations.lock().unwrap().iter().any(|l| l.id == *id))
        }

        async fn list_tables(&self) -> CatalogResult<Vec<Table>> {
            let mut all = self.tables.lock().unwrap().clone();
            all.sort_by(|a, b| a.label.cmp(&b.label));
            Ok(all)
        }

        async fn insert_table(&self, table: &Table) -> CatalogResult<()> {
            self.tables.lock().unwrap().push(table.clone());
            Ok(())
        }

        async fn update_table(&self, id: &TableId, patch: &TablePatch) -> CatalogResult<bool> {
            let mut tables = self.tables.lock().unwrap();
            Ok(match tables.iter_mut().find(|t| t.id == *id) {
                Some(t) => {
                    patch.apply(t);
                    true
                }
                None => false,
            })
        }
    }

    impl SettingsRepository for InMemoryCatalog {
        async fn theme(&self) -> CatalogResult<Theme> {
            Ok(self.theme.lock().unwrap().unwrap_or_default())
        }

        async fn set_theme(&self, theme: Theme) -> CatalogResult<()> {
            *self.theme.lock().unwrap() = Some(theme);
            Ok(())
        }
    }

    impl SalesReportRepository for InMemoryCatalog {
        async fn sales_by_period(&self, _range: SalesRange, limit: i64) -> CatalogResult<Vec<SalesRow>> {
            let mut rows = self.sales.lock().unwrap().clone();
            rows.sort_by(|a, b| b.period.cmp(&a.period));
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn best_items(&self, limit: i64) -> CatalogResult<Vec<BestItem>> {
            let mut items: Vec<BestItem> = Vec::new();
            for (_, product_id, _) in self.ordered.lock().unwrap().iter() {
                let Some(name) = self.product(*product_id).map(|p| p.name_en) else {
                    continue;
                };
                match items.iter_mut().find(|i| i.name == name) {
                    Some(item) => item.qty += 1,
                    None => items.push(BestItem { name, qty: 1 }),
                }
            }
            items.sort_by(|a, b| b.qty.cmp(&a.qty));
            items.truncate(limit as usize);
            Ok(items)
        }
    }

    pub fn actor(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: UserId::new(),
            role,
            name: "Nadia".to_string(),
            email: None,
            phone: "01722222222".to_string(),
            username: None,
            must_change_password: false,
        }
    }
}

#[cfg(test)]
mod menu_tests {
    use std::sync::Arc;

    use kernel::context::CurrentUser;
    use kernel::role::UserRole;
    use loyalty::memory::InMemoryLoyalty;

    use super::support::{InMemoryCatalog, actor};
    use crate::application::MenuUseCase;
    use crate::domain::theme::Theme;
    use crate::domain::venue::TablePatch;
    use crate::domain::repository::VenueRepository;
    use crate::error::CatalogError;

    fn venue() -> InMemoryCatalog {
        let repo = InMemoryCatalog::default();
        let location = repo.add_location("Gulshan");
        repo.add_table(location, "T1");
        repo
    }

    #[tokio::test]
    async fn test_missing_table_code_is_bad_request() {
        let use_case = MenuUseCase::new(Arc::new(venue()), Arc::new(InMemoryLoyalty::seeded()));

        for code in [None, Some(""), Some("   ")] {
            match use_case.execute(code, None).await.unwrap_err() {
                CatalogError::App(e) => {
                    assert_eq!(e.status_code(), 400);
                    assert_eq!(e.message(), "Missing tableCode");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_or_inactive_table_is_not_found() {
        let repo = InMemoryCatalog::default();
        let location = repo.add_location("Gulshan");
        let table = repo.add_table(location, "T9");
        let patch = TablePatch {
            is_active: Some(false),
            ..TablePatch::default()
        };
        repo.update_table(&table, &patch).await.unwrap();

        let use_case = MenuUseCase::new(Arc::new(repo), Arc::new(InMemoryLoyalty::seeded()));
        assert!(matches!(
            use_case.execute(Some("NOPE"), None).await.unwrap_err(),
            CatalogError::TableNotFound
        ));
        assert!(matches!(
            use_case.execute(Some("T9"), None).await.unwrap_err(),
            CatalogError::TableNotFound
        ));
    }

    #[tokio::test]
    async fn test_guest_menu_has_no_customer_block() {
        let repo = venue();
        let drinks = repo.add_category("drinks", 2);
        let snacks = repo.add_category("snacks", 1);
        let plain = repo.add_product(drinks, "tea", (false, false, false), 1);
        let featured = repo.add_product(snacks, "samosa", (true, false, false), 30);
        let hot = repo.add_product(drinks, "coffee", (false, false, true), 5);

        let use_case = MenuUseCase::new(Arc::new(repo), Arc::new(InMemoryLoyalty::seeded()));
        let menu = use_case.execute(Some(" T1 "), None).await.unwrap();

        assert_eq!(menu.table.code, "T1");
        assert_eq!(menu.table.location_name, "Gulshan");
        assert_eq!(menu.theme, Theme::Cyberpunk);
        let slugs: Vec<_> = menu.categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["snacks", "drinks"]);
        let ids: Vec<_> = menu.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![featured, hot, plain]);
        assert!(menu.customer.is_none());
        assert!(menu.previous_items.is_empty());
    }

    #[tokio::test]
    async fn test_customer_menu_carries_profile_and_previous_items() {
        let repo = venue();
        let drinks = repo.add_category("drinks", 1);
        let tea = repo.add_product(drinks, "tea", (false, false, false), 10);
        let coffee = repo.add_product(drinks, "coffee", (false, false, false), 10);

        let loyalty = InMemoryLoyalty::seeded();
        let customer_id = loyalty.add_customer("Rahim", 600);
        repo.record_order(customer_id, tea, 120);
        repo.record_order(customer_id, coffee, 60);
        repo.record_order(customer_id, tea, 5);

        let customer = CurrentUser {
            id: customer_id,
            ..actor(UserRole::Customer)
        };
        let use_case = MenuUseCase::new(Arc::new(repo), Arc::new(loyalty));
        let menu = use_case.execute(Some("T1"), Some(&customer)).await.unwrap();

        let profile = menu.customer.unwrap();
        assert_eq!(profile.points, 600);
        assert_eq!(profile.badge.key, "REGULAR");
        assert_eq!(profile.discount_percent, 3);
        let previous: Vec<_> = menu.previous_items.iter().map(|p| p.id).collect();
        assert_eq!(previous, vec![tea, coffee]);
    }

    #[tokio::test]
    async fn test_staff_viewer_is_treated_as_guest() {
        let use_case = MenuUseCase::new(Arc::new(venue()), Arc::new(InMemoryLoyalty::seeded()));
        let staff = actor(UserRole::Chef);
        let menu = use_case.execute(Some("T1"), Some(&staff)).await.unwrap();
        assert!(menu.customer.is_none());
    }
}

#[cfg(test)]
mod category_tests {
    use std::sync::Arc;

    use audit::AuditAction;
    use audit::memory::InMemoryAuditLog;
    use kernel::id::CategoryId;
    use kernel::pagination::PageQuery;
    use kernel::role::UserRole;

    use super::support::{InMemoryCatalog, actor};
    use crate::application::{CreateCategoryInput, ManageCategoriesUseCase};
    use crate::domain::category::CategoryPatch;
    use crate::error::CatalogError;

    fn input(slug: &str) -> CreateCategoryInput {
        CreateCategoryInput {
            slug: slug.to_string(),
            name_en: "Drinks".to_string(),
            name_bn: "পানীয়".to_string(),
            sort_order: 3,
        }
    }

    #[tokio::test]
    async fn test_create_stores_and_audits() {
        let repo = Arc::new(InMemoryCatalog::default());
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = ManageCategoriesUseCase::new(repo.clone(), audit.clone());
        let admin = actor(UserRole::Admin);

        let id = use_case.create(&admin, input("drinks")).await.unwrap();

        let stored = repo.category(id).unwrap();
        assert_eq!(stored.slug, "drinks");
        assert!(stored.is_active);
        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Create);
        assert_eq!(entries[0].entity_type, "category");
        assert_eq!(entries[0].entity_id, id.to_string());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields() {
        let repo = Arc::new(InMemoryCatalog::default());
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = ManageCategoriesUseCase::new(repo, audit.clone());

        match use_case.create(&actor(UserRole::Admin), input("")).await.unwrap_err() {
            CatalogError::App(e) => {
                assert_eq!(e.status_code(), 400);
                assert_eq!(e.message(), "Invalid category");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_deactivate() {
        let repo = Arc::new(InMemoryCatalog::default());
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = ManageCategoriesUseCase::new(repo.clone(), audit.clone());
        let manager = actor(UserRole::Manager);
        let id = use_case.create(&manager, input("drinks")).await.unwrap();

        let patch = CategoryPatch {
            name_en: Some("Beverages".to_string()),
            ..CategoryPatch::default()
        };
        use_case.update(&manager, &id, patch).await.unwrap();
        use_case.deactivate(&manager, &id).await.unwrap();

        let stored = repo.category(id).unwrap();
        assert_eq!(stored.name_en, "Beverages");
        assert_eq!(stored.slug, "drinks");
        assert!(!stored.is_active);
        let actions: Vec<_> = audit.entries().iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![AuditAction::Create, AuditAction::Update, AuditAction::Deactivate]
        );

        let page = use_case.list(PageQuery::default()).await.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let use_case = ManageCategoriesUseCase::new(
            Arc::new(InMemoryCatalog::default()),
            Arc::new(InMemoryAuditLog::default()),
        );
        let admin = actor(UserRole::Admin);
        let missing = CategoryId::new();

        assert!(matches!(
            use_case.update(&admin, &missing, CategoryPatch::default()).await.unwrap_err(),
            CatalogError::CategoryNotFound
        ));
        assert!(matches!(
            use_case.deactivate(&admin, &missing).await.unwrap_err(),
            CatalogError::CategoryNotFound
        ));
    }

    #[tokio::test]
    async fn test_blank_patch_field_is_rejected() {
        let repo = Arc::new(InMemoryCatalog::default());
        let id = repo.add_category("drinks", 1);
        let use_case = ManageCategoriesUseCase::new(repo.clone(), Arc::new(InMemoryAuditLog::default()));

        let patch = CategoryPatch {
            slug: Some(String::new()),
            ..CategoryPatch::default()
        };
        let err = use_case.update(&actor(UserRole::Admin), &id, patch).await.unwrap_err();
        assert!(matches!(err, CatalogError::App(ref e) if e.message() == "Invalid update"));
        assert_eq!(repo.category(id).unwrap().slug, "drinks");
    }
}

#[cfg(test)]
mod product_tests {
    use std::sync::Arc;

    use audit::AuditAction;
    use audit::memory::InMemoryAuditLog;
    use kernel::id::{CategoryId, ProductId};
    use kernel::role::UserRole;

    use super::support::{InMemoryCatalog, actor};
    use crate::application::{BrowseProductsUseCase, CreateProductInput, ManageProductsUseCase};
    use crate::domain::product::{ProductFilter, ProductPatch};
    use crate::error::CatalogError;

    fn input(category_id: CategoryId, price: Option<i64>) -> CreateProductInput {
        CreateProductInput {
            category_id: Some(category_id),
            slug: "masala-tea".to_string(),
            name_en: "Masala Tea".to_string(),
            name_bn: "মসলা চা".to_string(),
            description_en: "Spiced".to_string(),
            description_bn: "মসলাদার".to_string(),
            price,
            is_hot: true,
            ..CreateProductInput::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_active_and_audits() {
        let repo = Arc::new(InMemoryCatalog::default());
        let drinks = repo.add_category("drinks", 1);
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = ManageProductsUseCase::new(repo.clone(), audit.clone());

        let id = use_case
            .create(&actor(UserRole::Admin), input(drinks, Some(120)))
            .await
            .unwrap();

        let stored = repo.product(id).unwrap();
        assert_eq!(stored.price, 120);
        assert!(stored.is_active);
        assert!(stored.is_hot);
        assert!(!stored.is_featured);
        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type, "product");
        assert_eq!(entries[0].action, AuditAction::Create);
    }

    #[tokio::test]
    async fn test_price_must_be_positive() {
        let repo = Arc::new(InMemoryCatalog::default());
        let drinks = repo.add_category("drinks", 1);
        let use_case = ManageProductsUseCase::new(repo, Arc::new(InMemoryAuditLog::default()));

        for price in [None, Some(0), Some(-5)] {
            let err = use_case
                .create(&actor(UserRole::Admin), input(drinks, price))
                .await
                .unwrap_err();
            match err {
                CatalogError::App(e) => {
                    assert_eq!(e.status_code(), 400);
                    assert_eq!(e.message(), "Invalid product");
                    assert!(e.details().is_some());
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let use_case = ManageProductsUseCase::new(
            Arc::new(InMemoryCatalog::default()),
            Arc::new(InMemoryAuditLog::default()),
        );
        let err = use_case
            .create(&actor(UserRole::Admin), input(CategoryId::new(), Some(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory));
        assert_eq!(err.kind().status_code(), 400);
    }

    #[tokio::test]
    async fn test_update_patches_only_given_fields() {
        let repo = Arc::new(InMemoryCatalog::default());
        let drinks = repo.add_category("drinks", 1);
        let id = repo.add_product(drinks, "tea", (false, false, false), 1);
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = ManageProductsUseCase::new(repo.clone(), audit.clone());

        let patch = ProductPatch {
            price: Some(300),
            is_trending: Some(true),
            ..ProductPatch::default()
        };
        use_case.update(&actor(UserRole::Manager), &id, patch).await.unwrap();

        let stored = repo.product(id).unwrap();
        assert_eq!(stored.price, 300);
        assert!(stored.is_trending);
        assert_eq!(stored.slug, "tea");
        assert_eq!(audit.entries()[0].action, AuditAction::Update);
    }

    #[tokio::test]
    async fn test_update_validates_price_and_category() {
        let repo = Arc::new(InMemoryCatalog::default());
        let drinks = repo.add_category("drinks", 1);
        let id = repo.add_product(drinks, "tea", (false, false, false), 1);
        let use_case = ManageProductsUseCase::new(repo.clone(), Arc::new(InMemoryAuditLog::default()));
        let admin = actor(UserRole::Admin);

        let zero = ProductPatch {
            price: Some(0),
            ..ProductPatch::default()
        };
        assert!(matches!(
            use_case.update(&admin, &id, zero).await.unwrap_err(),
            CatalogError::App(_)
        ));

        let moved = ProductPatch {
            category_id: Some(CategoryId::new()),
            ..ProductPatch::default()
        };
        assert!(matches!(
            use_case.update(&admin, &id, moved).await.unwrap_err(),
            CatalogError::UnknownCategory
        ));

        assert!(matches!(
            use_case
                .update(&admin, &ProductId::new(), ProductPatch::default())
                .await
                .unwrap_err(),
            CatalogError::ProductNotFound
        ));
        assert_eq!(repo.product(id).unwrap().price, 250);
    }

    #[tokio::test]
    async fn test_deactivated_product_leaves_search() {
        let repo = Arc::new(InMemoryCatalog::default());
        let drinks = repo.add_category("drinks", 1);
        let id = repo.add_product(drinks, "tea", (false, false, false), 1);
        let manage = ManageProductsUseCase::new(repo.clone(), Arc::new(InMemoryAuditLog::default()));
        manage.deactivate(&actor(UserRole::Admin), &id).await.unwrap();

        let found = BrowseProductsUseCase::new(repo.clone())
            .execute(&ProductFilter::default())
            .await
            .unwrap();
        assert!(found.is_empty());
        assert!(repo.product(id).is_some());
    }

    #[tokio::test]
    async fn test_search_filters_by_category_and_flags() {
        let repo = Arc::new(InMemoryCatalog::default());
        let drinks = repo.add_category("drinks", 1);
        let snacks = repo.add_category("snacks", 2);
        let coffee = repo.add_product(drinks, "coffee", (false, true, true), 1);
        repo.add_product(drinks, "tea", (false, false, false), 2);
        let samosa = repo.add_product(snacks, "samosa", (false, false, true), 3);

        let browse = BrowseProductsUseCase::new(repo);

        let hot = browse
            .execute(&ProductFilter {
                hot_only: true,
                ..ProductFilter::default()
            })
            .await
            .unwrap();
        let hot_ids: Vec<_> = hot.iter().map(|p| p.id).collect();
        assert_eq!(hot_ids, vec![coffee, samosa]);

        let drinks_hot = browse
            .execute(&ProductFilter {
                category: Some("drinks".to_string()),
                hot_only: true,
                trending_only: false,
            })
            .await
            .unwrap();
        assert_eq!(drinks_hot.len(), 1);
        assert_eq!(drinks_hot[0].id, coffee);

        let unknown = browse
            .execute(&ProductFilter {
                category: Some("desserts".to_string()),
                ..ProductFilter::default()
            })
            .await
            .unwrap();
        assert!(unknown.is_empty());
    }
}

#[cfg(test)]
mod table_tests {
    use std::sync::Arc;

    use audit::AuditAction;
    use audit::memory::InMemoryAuditLog;
    use kernel::id::{LocationId, TableId};
    use kernel::role::UserRole;

    use super::support::{InMemoryCatalog, actor};
    use crate::application::{CreateTableInput, ManageTablesUseCase};
    use crate::domain::venue::TablePatch;
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_create_requires_known_location() {
        let use_case = ManageTablesUseCase::new(
            Arc::new(InMemoryCatalog::default()),
            Arc::new(InMemoryAuditLog::default()),
        );
        let input = CreateTableInput {
            location_id: Some(LocationId::new()),
            code: "T1".to_string(),
            label: "Window".to_string(),
        };
        assert!(matches!(
            use_case.create(&actor(UserRole::Admin), input).await.unwrap_err(),
            CatalogError::UnknownLocation
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let use_case = ManageTablesUseCase::new(
            Arc::new(InMemoryCatalog::default()),
            Arc::new(InMemoryAuditLog::default()),
        );
        let err = use_case
            .create(&actor(UserRole::Admin), CreateTableInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::App(ref e) if e.message() == "Invalid table"));
    }

    #[tokio::test]
    async fn test_create_then_deactivate() {
        let repo = Arc::new(InMemoryCatalog::default());
        let location = repo.add_location("Dhanmondi");
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = ManageTablesUseCase::new(repo.clone(), audit.clone());
        let admin = actor(UserRole::Admin);

        let id = use_case
            .create(
                &admin,
                CreateTableInput {
                    location_id: Some(location),
                    code: " D4 ".to_string(),
                    label: "Patio 4".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(repo.table(id).unwrap().code, "D4");

        let patch = TablePatch {
            is_active: Some(false),
            ..TablePatch::default()
        };
        use_case.update(&admin, &id, patch).await.unwrap();
        assert!(!repo.table(id).unwrap().is_active);

        let tables = use_case.tables().await.unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(use_case.locations().await.unwrap().len(), 1);

        let entries = audit.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_type, "table");
        assert_eq!(entries[1].action, AuditAction::Update);
    }

    #[tokio::test]
    async fn test_update_unknown_table_is_not_found() {
        let use_case = ManageTablesUseCase::new(
            Arc::new(InMemoryCatalog::default()),
            Arc::new(InMemoryAuditLog::default()),
        );
        let err = use_case
            .update(&actor(UserRole::Admin), &TableId::new(), TablePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::TableNotFound));
    }
}

#[cfg(test)]
mod theme_tests {
    use std::sync::Arc;

    use audit::AuditAction;
    use audit::memory::InMemoryAuditLog;
    use kernel::role::UserRole;

    use super::support::{InMemoryCatalog, actor};
    use crate::application::ThemeSettingsUseCase;
    use crate::domain::theme::Theme;
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_default_theme_is_cyberpunk() {
        let use_case = ThemeSettingsUseCase::new(
            Arc::new(InMemoryCatalog::default()),
            Arc::new(InMemoryAuditLog::default()),
        );
        assert_eq!(use_case.get().await.unwrap(), Theme::Cyberpunk);
    }

    #[tokio::test]
    async fn test_set_theme_persists_and_audits() {
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = ThemeSettingsUseCase::new(Arc::new(InMemoryCatalog::default()), audit.clone());

        let theme = use_case.set(&actor(UserRole::Admin), "apple").await.unwrap();
        assert_eq!(theme, Theme::Apple);
        assert_eq!(use_case.get().await.unwrap(), Theme::Apple);

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Update);
        assert_eq!(entries[0].entity_type, "settings");
        assert_eq!(entries[0].entity_id, "theme");
    }

    #[tokio::test]
    async fn test_unknown_theme_is_rejected() {
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = ThemeSettingsUseCase::new(Arc::new(InMemoryCatalog::default()), audit.clone());

        let err = use_case.set(&actor(UserRole::Admin), "vaporwave").await.unwrap_err();
        assert!(matches!(err, CatalogError::App(ref e) if e.message() == "Invalid theme"));
        assert_eq!(use_case.get().await.unwrap(), Theme::Cyberpunk);
        assert!(audit.entries().is_empty());
    }
}

#[cfg(test)]
mod report_tests {
    use std::sync::Arc;

    use kernel::id::UserId;

    use super::support::InMemoryCatalog;
    use crate::application::SalesReportUseCase;
    use crate::domain::report::SalesRange;

    #[tokio::test]
    async fn test_sales_latest_period_first() {
        let repo = Arc::new(InMemoryCatalog::default());
        repo.add_sales("2026-10-01", 1200);
        repo.add_sales("2026-10-03", 800);
        repo.add_sales("2026-10-02", 450);

        let rows = SalesReportUseCase::new(repo).sales(SalesRange::Daily).await.unwrap();
        let periods: Vec<_> = rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["2026-10-03", "2026-10-02", "2026-10-01"]);
    }

    #[tokio::test]
    async fn test_best_items_by_quantity() {
        let repo = Arc::new(InMemoryCatalog::default());
        let drinks = repo.add_category("drinks", 1);
        let tea = repo.add_product(drinks, "tea", (false, false, false), 1);
        let coffee = repo.add_product(drinks, "coffee", (false, false, false), 1);
        let customer = UserId::new();
        repo.record_order(customer, coffee, 3);
        repo.record_order(customer, tea, 2);
        repo.record_order(customer, tea, 1);

        let items = SalesReportUseCase::new(repo).best_items().await.unwrap();
        assert_eq!(items[0].name, "tea");
        assert_eq!(items[0].qty, 2);
        assert_eq!(items[1].name, "coffee");
    }
}
