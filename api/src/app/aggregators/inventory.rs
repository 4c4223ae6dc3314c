//! Inventory aggregator
//!
//! Inventory value and turnover are heuristics kept for compatibility with
//! the existing dashboard: value multiplies the *aggregate* stock by the
//! *aggregate* price, and turnover estimates average inventory as
//! `(stock + 10) / 2` over all-time sales.

use std::sync::Arc;

use crate::app::metrics::{average, round2, turnover_ratio};
use crate::domain::entities::{InventoryAnalytics, InventoryOverview, Period, StockLevel};
use crate::domain::ports::InventoryRepository;
use crate::error::DomainError;

use super::TOP_N;

pub struct InventoryAggregator<R>
where
    R: InventoryRepository,
{
    repo: Arc<R>,
}

impl<R> InventoryAggregator<R>
where
    R: InventoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn aggregate(&self, period: &Period) -> Result<InventoryAnalytics, DomainError> {
        let counts = self.repo.stock_counts().await?;
        let totals = self.repo.stock_value_totals().await?;
        let movements = self.repo.stock_movements().await?;
        let top_selling_products = self.repo.top_selling_products(period, TOP_N).await?;
        let low_stock_products = low_stock_only(self.repo.low_stock_products().await?);

        let inventory_turnover = round2(average(
            movements
                .iter()
                .map(|m| turnover_ratio(m.quantity_sold, m.stock)),
        ));

        let overview = InventoryOverview {
            total_products: counts.total_products,
            low_stock_products: counts.low_stock,
            out_of_stock_products: counts.out_of_stock,
            inventory_value: totals.total_stock as f64 * totals.total_price,
            inventory_turnover,
        };

        Ok(InventoryAnalytics {
            overview,
            top_selling_products,
            low_stock_products,
        })
    }
}

/// Keep only `0 < stock < LOW_STOCK_THRESHOLD`, ascending by stock
fn low_stock_only(mut products: Vec<StockLevel>) -> Vec<StockLevel> {
    products.retain(StockLevel::is_low_stock);
    products.sort_by_key(|p| p.stock);
    products
}
