//! Sales analytics types

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::snapshot::MetricRow;

/// Order revenue and count over a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalesTotals {
    pub revenue: f64,
    pub orders: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRevenue {
    pub product_id: Uuid,
    pub name: String,
    pub revenue: f64,
    pub units_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverview {
    pub total_sales: f64,
    pub total_orders: i64,
    pub average_order_value: f64,
    /// Revenue change against the preceding window of equal length, in percent
    pub revenue_growth: f64,
}

impl SalesOverview {
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        vec![
            MetricRow::new("Total Sales", self.total_sales),
            MetricRow::new("Total Orders", self.total_orders as f64),
            MetricRow::new("Average Order Value", self.average_order_value),
            MetricRow::new("Revenue Growth (%)", self.revenue_growth),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalytics {
    pub overview: SalesOverview,
    /// Top products by revenue, descending
    pub top_products: Vec<ProductRevenue>,
    /// Descending by revenue
    pub category_revenue: Vec<CategoryRevenue>,
    /// Ascending by date
    pub daily_revenue: Vec<DailyRevenue>,
}
