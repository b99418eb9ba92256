//! Domain Layer
//!
//! Menu entities, venue (locations and tables), the theme setting, report
//! rows and repository traits.

pub mod category;
pub mod product;
pub mod report;
pub mod repository;
pub mod theme;
pub mod venue;

pub use category::{Category, CategoryPatch};
pub use product::{Product, ProductFilter, ProductPatch};
pub use report::{BestItem, SalesRange, SalesRow};
pub use repository::{CatalogRepository, SalesReportRepository, SettingsRepository, VenueRepository};
pub use theme::Theme;
pub use venue::{Location, Table, TablePatch, TableSite};
