//! Inventory analytics types

use serde::Serialize;
use uuid::Uuid;

use super::snapshot::MetricRow;

/// Products with stock strictly below this are "low stock" (when above zero)
pub const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StockCounts {
    pub total_products: i64,
    pub low_stock: i64,
    pub out_of_stock: i64,
}

/// Aggregate sums over the whole catalogue
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StockValueTotals {
    pub total_stock: i64,
    pub total_price: f64,
}

/// Input row for the turnover heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockMovement {
    pub product_id: Uuid,
    pub stock: i32,
    pub quantity_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: Uuid,
    pub name: String,
    pub quantity_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub product_id: Uuid,
    pub name: String,
    pub sku: String,
    pub stock: i32,
    pub price: f64,
}

impl StockLevel {
    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock < LOW_STOCK_THRESHOLD
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOverview {
    pub total_products: i64,
    pub low_stock_products: i64,
    pub out_of_stock_products: i64,
    pub inventory_value: f64,
    pub inventory_turnover: f64,
}

impl InventoryOverview {
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        vec![
            MetricRow::new("Total Products", self.total_products as f64),
            MetricRow::new("Low Stock Products", self.low_stock_products as f64),
            MetricRow::new("Out of Stock Products", self.out_of_stock_products as f64),
            MetricRow::new("Inventory Value", self.inventory_value),
            MetricRow::new("Inventory Turnover", self.inventory_turnover),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAnalytics {
    pub overview: InventoryOverview,
    pub top_selling_products: Vec<ProductSales>,
    /// Ascending by stock; only `0 < stock < LOW_STOCK_THRESHOLD`
    pub low_stock_products: Vec<StockLevel>,
}
