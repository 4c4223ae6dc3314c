//! Customer analytics types

use serde::Serialize;
use uuid::Uuid;

use super::snapshot::MetricRow;

/// Coarse lifetime-value classification of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LtvBucket {
    Low,
    Medium,
    High,
}

impl LtvBucket {
    pub const ALL: [LtvBucket; 3] = [LtvBucket::Low, LtvBucket::Medium, LtvBucket::High];
}

impl std::fmt::Display for LtvBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LtvBucket::Low => write!(f, "Low"),
            LtvBucket::Medium => write!(f, "Medium"),
            LtvBucket::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSpend {
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub total_spent: f64,
    pub orders: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCount {
    pub location: String,
    pub customers: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LtvBucketCount {
    pub bucket: LtvBucket,
    pub customers: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOverview {
    pub total_customers: i64,
    pub new_customers: i64,
    pub returning_customers: i64,
    pub churn_rate: f64,
}

impl CustomerOverview {
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        vec![
            MetricRow::new("Total Customers", self.total_customers as f64),
            MetricRow::new("New Customers", self.new_customers as f64),
            MetricRow::new("Returning Customers", self.returning_customers as f64),
            MetricRow::new("Churn Rate (%)", self.churn_rate),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAnalytics {
    pub overview: CustomerOverview,
    pub top_customers: Vec<CustomerSpend>,
    pub customers_by_location: Vec<LocationCount>,
    /// Always one entry per bucket, Low to High
    pub customer_lifetime_value: Vec<LtvBucketCount>,
}
