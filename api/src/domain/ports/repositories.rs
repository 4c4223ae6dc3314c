//! Repository port traits
//!
//! These traits define the read-only query capabilities the aggregators need
//! from the transactional store, plus the append-only report ledger.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! Every method that returns a list documents its ordering; aggregators rely
//! on it and do not re-sort.

use async_trait::async_trait;

use crate::domain::entities::{
    Campaign, CategoryRevenue, CustomerSpend, DailyRevenue, EmailCampaign, ExpenseCategory,
    Invoice, InvoiceStatus, LocationCount, NewReportLedgerEntry, Period, ProductRevenue,
    ProductSales, Promotion, ReportFilter, ReportLedgerEntry, SalesTotals, SocialMediaPost,
    StockCounts, StockLevel, StockMovement, StockValueTotals,
};
use crate::error::DomainError;

/// Order and order-item queries
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Sum of order totals and number of orders created in the period
    async fn sales_totals(&self, period: &Period) -> Result<SalesTotals, DomainError>;

    /// Products by line-item revenue in the period, descending
    async fn top_products_by_revenue(
        &self,
        period: &Period,
        limit: u64,
    ) -> Result<Vec<ProductRevenue>, DomainError>;

    /// Line-item revenue grouped by product category, descending
    async fn revenue_by_category(&self, period: &Period)
        -> Result<Vec<CategoryRevenue>, DomainError>;

    /// Order revenue grouped by calendar day, ascending by date
    async fn daily_revenue(&self, period: &Period) -> Result<Vec<DailyRevenue>, DomainError>;
}

/// Customer queries
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers ever created
    async fn count_customers(&self) -> Result<i64, DomainError>;

    /// Customers created within the period
    async fn count_new_customers(&self, period: &Period) -> Result<i64, DomainError>;

    /// Customers with more than one order within the period
    async fn count_returning_customers(&self, period: &Period) -> Result<i64, DomainError>;

    /// Customers by spend on orders in the period, descending
    async fn top_customers_by_spend(
        &self,
        period: &Period,
        limit: u64,
    ) -> Result<Vec<CustomerSpend>, DomainError>;

    /// Customer count per location, descending
    async fn customers_by_location(&self) -> Result<Vec<LocationCount>, DomainError>;

    /// All-time order total for every customer that has ordered
    async fn lifetime_spend(&self) -> Result<Vec<f64>, DomainError>;
}

/// Product stock queries
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Total, low-stock (`0 < stock < 10`) and out-of-stock product counts
    async fn stock_counts(&self) -> Result<StockCounts, DomainError>;

    /// `Σstock` and `Σprice` across the catalogue
    async fn stock_value_totals(&self) -> Result<StockValueTotals, DomainError>;

    /// Stock and all-time quantity sold for every product
    async fn stock_movements(&self) -> Result<Vec<StockMovement>, DomainError>;

    /// Products by quantity sold in the period, descending
    async fn top_selling_products(
        &self,
        period: &Period,
        limit: u64,
    ) -> Result<Vec<ProductSales>, DomainError>;

    /// Products with `0 < stock < 10`, ascending by stock
    async fn low_stock_products(&self) -> Result<Vec<StockLevel>, DomainError>;
}

/// Campaign, promotion, email and social queries
#[async_trait]
pub trait MarketingRepository: Send + Sync {
    /// Campaigns created in the period, newest first
    async fn campaigns(&self, period: &Period) -> Result<Vec<Campaign>, DomainError>;

    /// Campaigns currently in `active` status, regardless of period
    async fn count_active_campaigns(&self) -> Result<i64, DomainError>;

    /// Promotions created in the period, newest first
    async fn promotions(&self, period: &Period) -> Result<Vec<Promotion>, DomainError>;

    /// Email campaigns created in the period, newest first
    async fn email_campaigns(&self, period: &Period) -> Result<Vec<EmailCampaign>, DomainError>;

    /// Social posts created in the period, newest first
    async fn social_media_posts(&self, period: &Period)
        -> Result<Vec<SocialMediaPost>, DomainError>;
}

/// Invoice and expense queries
#[async_trait]
pub trait FinancialRepository: Send + Sync {
    /// Sum of invoice amounts with the given status issued in the period
    async fn invoice_total(
        &self,
        period: &Period,
        status: InvoiceStatus,
    ) -> Result<f64, DomainError>;

    /// Invoices with the given status issued in the period.
    /// Paid: descending by issue date. Pending / overdue: ascending by due date.
    async fn invoices(
        &self,
        period: &Period,
        status: InvoiceStatus,
    ) -> Result<Vec<Invoice>, DomainError>;

    /// Sum of expenses incurred in the period
    async fn expense_total(&self, period: &Period) -> Result<f64, DomainError>;

    /// Expenses grouped by category, descending by amount
    async fn expenses_by_category(
        &self,
        period: &Period,
    ) -> Result<Vec<ExpenseCategory>, DomainError>;
}

/// Append-only ledger of generated reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Append a new entry
    async fn record(&self, entry: &NewReportLedgerEntry) -> Result<ReportLedgerEntry, DomainError>;

    /// Entries matching the filter, newest first, at most `filter.limit`
    async fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportLedgerEntry>, DomainError>;
}
