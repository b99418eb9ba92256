//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Categories, products, locations, tables, theme, report rows
//! - `application/` - Use cases (menu, product search, admin CRUD, reports)
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Nothing here is ever hard-deleted: categories, products and tables are
//! deactivated so historical orders keep valid references.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use domain::repository::{
    CatalogRepository, LocalCatalogRepository, LocalSalesReportRepository,
    LocalSettingsRepository, LocalVenueRepository, SalesReportRepository, SettingsRepository,
    VenueRepository,
};
pub use domain::theme::Theme;
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::catalog_router;
