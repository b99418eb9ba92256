//! Application Layer - Use Cases

pub mod categories;
pub mod menu;
pub mod products;
pub mod reports;
pub mod tables;
pub mod theme;

pub use categories::{CreateCategoryInput, ManageCategoriesUseCase};
pub use menu::{Menu, MenuUseCase};
pub use products::{BrowseProductsUseCase, CreateProductInput, ManageProductsUseCase};
pub use reports::SalesReportUseCase;
pub use tables::{CreateTableInput, ManageTablesUseCase};
pub use theme::ThemeSettingsUseCase;

use kernel::validation::Validator;

/// Optional text field: when present it must not be blank.
pub(crate) fn check_present(v: &mut Validator, field: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        v.min_chars(field, value, 1);
    }
}
