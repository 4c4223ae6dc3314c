//! Sales aggregator

use std::sync::Arc;

use crate::app::metrics::{percentage_growth, round2, safe_divide};
use crate::domain::entities::{Period, SalesAnalytics, SalesOverview};
use crate::domain::ports::SalesRepository;
use crate::error::DomainError;

use super::TOP_N;

pub struct SalesAggregator<R>
where
    R: SalesRepository,
{
    repo: Arc<R>,
}

impl<R> SalesAggregator<R>
where
    R: SalesRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn aggregate(&self, period: &Period) -> Result<SalesAnalytics, DomainError> {
        let totals = self.repo.sales_totals(period).await?;
        let previous = self.repo.sales_totals(&period.previous()).await?;
        let top_products = self.repo.top_products_by_revenue(period, TOP_N).await?;
        let category_revenue = self.repo.revenue_by_category(period).await?;
        let daily_revenue = self.repo.daily_revenue(period).await?;

        let overview = SalesOverview {
            total_sales: totals.revenue,
            total_orders: totals.orders,
            average_order_value: round2(safe_divide(totals.revenue, totals.orders as f64, 1.0)),
            revenue_growth: percentage_growth(totals.revenue, previous.revenue),
        };

        Ok(SalesAnalytics {
            overview,
            top_products,
            category_revenue,
            daily_revenue,
        })
    }
}
