use std::sync::Arc;

use crate::domain::report::{BEST_ITEMS, BestItem, SALES_PERIODS, SalesRange, SalesRow};
use crate::domain::repository::SalesReportRepository;
use crate::error::CatalogResult;

/// Revenue and best sellers over served orders.
pub struct SalesReportUseCase<R>
where
    R: SalesReportRepository,
{
    repo: Arc<R>,
}

impl<R> SalesReportUseCase<R>
where
    R: SalesReportRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn sales(&self, range: SalesRange) -> CatalogResult<Vec<SalesRow>> {
        self.repo.sales_by_period(range, SALES_PERIODS).await
    }

    pub async fn best_items(&self) -> CatalogResult<Vec<BestItem>> {
        self.repo.best_items(BEST_ITEMS).await
    }
}
