//! Menu Use Case
//!
//! Everything a table's ordering screen needs in one read.

use std::sync::Arc;

use kernel::context::CurrentUser;
use kernel::error::app_error::AppError;
use kernel::role::UserRole;
use loyalty::application::BuildProfileUseCase;
use loyalty::{CustomerProfile, LoyaltyRepository};

use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::repository::{CatalogRepository, SettingsRepository, VenueRepository};
use crate::domain::theme::Theme;
use crate::domain::venue::TableSite;
use crate::error::{CatalogError, CatalogResult};

/// Previously ordered products shown to a returning customer
pub const PREVIOUS_ITEMS_LIMIT: i64 = 6;

#[derive(Debug, Clone)]
pub struct Menu {
    pub table: TableSite,
    pub theme: Theme,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    /// Present only for signed-in customers
    pub customer: Option<CustomerProfile>,
    pub previous_items: Vec<Product>,
}

pub struct MenuUseCase<R, L>
where
    R: CatalogRepository + VenueRepository + SettingsRepository,
    L: LoyaltyRepository,
{
    repo: Arc<R>,
    loyalty: Arc<L>,
}

impl<R, L> MenuUseCase<R, L>
where
    R: CatalogRepository + VenueRepository + SettingsRepository,
    L: LoyaltyRepository,
{
    pub fn new(repo: Arc<R>, loyalty: Arc<L>) -> Self {
        Self { repo, loyalty }
    }

    pub async fn execute(&self, table_code: Option<&str>, viewer: Option<&CurrentUser>) -> CatalogResult<Menu> {
        let table_code = table_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::bad_request("Missing tableCode"))?;

        let table = self
            .repo
            .find_active_table(table_code)
            .await?
            .ok_or(CatalogError::TableNotFound)?;

        let categories = self.repo.active_categories().await?;
        let products = self.repo.menu_products().await?;
        let theme = self.repo.theme().await?;

        let (customer, previous_items) = match viewer {
            Some(user) if user.role == UserRole::Customer => {
                let profile = BuildProfileUseCase::new(self.loyalty.clone()).execute(user).await?;
                let previous = self.repo.previous_products(&user.id, PREVIOUS_ITEMS_LIMIT).await?;
                (Some(profile), previous)
            }
            _ => (None, Vec::new()),
        };

        Ok(Menu {
            table,
            theme,
            categories,
            products,
            customer,
            previous_items,
        })
    }
}
