//! Domain snapshots
//!
//! The result of one aggregation run: the domain, the resolved period, and the
//! typed overview + breakdowns for that domain. Snapshots are built fresh per
//! request and never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::customer::CustomerAnalytics;
use super::financial::FinancialAnalytics;
use super::inventory::InventoryAnalytics;
use super::marketing::MarketingAnalytics;
use super::period::Period;
use super::sales::SalesAnalytics;

/// One of the independently aggregated business areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Sales,
    Customers,
    Inventory,
    Marketing,
    Financial,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Sales,
        Domain::Customers,
        Domain::Inventory,
        Domain::Marketing,
        Domain::Financial,
    ];
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Sales => write!(f, "sales"),
            Domain::Customers => write!(f, "customers"),
            Domain::Inventory => write!(f, "inventory"),
            Domain::Marketing => write!(f, "marketing"),
            Domain::Financial => write!(f, "financial"),
        }
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sales" => Ok(Domain::Sales),
            "customers" | "customer" => Ok(Domain::Customers),
            "inventory" => Ok(Domain::Inventory),
            "marketing" => Ok(Domain::Marketing),
            "financial" => Ok(Domain::Financial),
            _ => Err(format!("Unknown analytics domain: {}", s)),
        }
    }
}

/// One flattened `{metric, value}` pair, the unit every exporter consumes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: String,
    pub value: f64,
}

impl MetricRow {
    pub fn new(metric: impl Into<String>, value: f64) -> Self {
        Self {
            metric: metric.into(),
            value,
        }
    }
}

/// Per-domain analytics payload
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DomainAnalytics {
    Sales(SalesAnalytics),
    Customers(CustomerAnalytics),
    Inventory(InventoryAnalytics),
    Marketing(MarketingAnalytics),
    Financial(FinancialAnalytics),
}

impl DomainAnalytics {
    pub fn domain(&self) -> Domain {
        match self {
            DomainAnalytics::Sales(_) => Domain::Sales,
            DomainAnalytics::Customers(_) => Domain::Customers,
            DomainAnalytics::Inventory(_) => Domain::Inventory,
            DomainAnalytics::Marketing(_) => Domain::Marketing,
            DomainAnalytics::Financial(_) => Domain::Financial,
        }
    }

    /// Overview metrics only; breakdowns are not part of the export dataset.
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        match self {
            DomainAnalytics::Sales(a) => a.overview.metric_rows(),
            DomainAnalytics::Customers(a) => a.overview.metric_rows(),
            DomainAnalytics::Inventory(a) => a.overview.metric_rows(),
            DomainAnalytics::Marketing(a) => a.overview.metric_rows(),
            DomainAnalytics::Financial(a) => a.overview.metric_rows(),
        }
    }
}

/// Result of aggregating one domain over one period
#[derive(Debug, Clone, Serialize)]
pub struct DomainSnapshot {
    pub domain: Domain,
    pub period: Period,
    #[serde(flatten)]
    pub analytics: DomainAnalytics,
}

impl DomainSnapshot {
    pub fn new(period: Period, analytics: DomainAnalytics) -> Self {
        Self {
            domain: analytics.domain(),
            period,
            analytics,
        }
    }

    pub fn metric_rows(&self) -> Vec<MetricRow> {
        self.analytics.metric_rows()
    }
}

/// All five domains aggregated over the same period
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub period: Period,
    pub sales: SalesAnalytics,
    pub customers: CustomerAnalytics,
    pub inventory: InventoryAnalytics,
    pub marketing: MarketingAnalytics,
    pub financial: FinancialAnalytics,
}
