//! Domain entities
//!
//! Pure domain models for the analytics engine.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod customer;
pub mod financial;
pub mod inventory;
pub mod marketing;
pub mod period;
pub mod report;
pub mod sales;
pub mod snapshot;

pub use customer::{
    CustomerAnalytics, CustomerOverview, CustomerSpend, LocationCount, LtvBucket, LtvBucketCount,
};
pub use financial::{
    ExpenseCategory, FinancialAnalytics, FinancialOverview, Invoice, InvoiceStatus,
};
pub use inventory::{
    InventoryAnalytics, InventoryOverview, ProductSales, StockCounts, StockLevel, StockMovement,
    StockValueTotals, LOW_STOCK_THRESHOLD,
};
pub use marketing::{
    Campaign, EmailCampaign, MarketingAnalytics, MarketingOverview, Promotion, SocialMediaPost,
    ACTIVE_CAMPAIGN_STATUS,
};
pub use period::{Period, PeriodToken};
pub use report::{
    FinancialStatement, NewReportLedgerEntry, ReportArtifact, ReportDocument, ReportFilter,
    ReportFormat, ReportId, ReportJob, ReportLedgerEntry, ReportRequest, ReportType,
};
pub use sales::{CategoryRevenue, DailyRevenue, ProductRevenue, SalesAnalytics, SalesOverview, SalesTotals};
pub use snapshot::{Dashboard, Domain, DomainAnalytics, DomainSnapshot, MetricRow};
