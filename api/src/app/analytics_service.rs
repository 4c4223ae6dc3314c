//! Analytics service
//!
//! Entry point for on-demand analytics. Owns one aggregator per domain and
//! bounds every aggregation with the configured deadline. The dashboard fans
//! out to all five domains concurrently; the first failure fails the request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::app::aggregators::{
    CustomerAggregator, FinancialAggregator, InventoryAggregator, MarketingAggregator,
    SalesAggregator,
};
use crate::domain::entities::{
    CustomerAnalytics, Dashboard, Domain, DomainAnalytics, DomainSnapshot, FinancialAnalytics,
    InventoryAnalytics, MarketingAnalytics, Period, SalesAnalytics,
};
use crate::domain::ports::{
    CustomerRepository, FinancialRepository, InventoryRepository, MarketingRepository,
    SalesRepository,
};
use crate::error::{AnalyticsError, DomainError};

pub struct AnalyticsService<S, C, I, M, F>
where
    S: SalesRepository,
    C: CustomerRepository,
    I: InventoryRepository,
    M: MarketingRepository,
    F: FinancialRepository,
{
    sales: SalesAggregator<S>,
    customers: CustomerAggregator<C>,
    inventory: InventoryAggregator<I>,
    marketing: MarketingAggregator<M>,
    financial: FinancialAggregator<F>,
    timeout: Duration,
}

impl<S, C, I, M, F> AnalyticsService<S, C, I, M, F>
where
    S: SalesRepository,
    C: CustomerRepository,
    I: InventoryRepository,
    M: MarketingRepository,
    F: FinancialRepository,
{
    pub fn new(
        sales: Arc<S>,
        customers: Arc<C>,
        inventory: Arc<I>,
        marketing: Arc<M>,
        financial: Arc<F>,
        timeout: Duration,
    ) -> Self {
        Self {
            sales: SalesAggregator::new(sales),
            customers: CustomerAggregator::new(customers),
            inventory: InventoryAggregator::new(inventory),
            marketing: MarketingAggregator::new(marketing),
            financial: FinancialAggregator::new(financial),
            timeout,
        }
    }

    /// Run one aggregation under the deadline, tagging failures with the domain
    async fn bounded<T>(
        &self,
        domain: Domain,
        aggregation: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, AnalyticsError> {
        match tokio::time::timeout(self.timeout, aggregation).await {
            Ok(Ok(analytics)) => Ok(analytics),
            Ok(Err(source)) => Err(AnalyticsError::Upstream { domain, source }),
            Err(_) => Err(AnalyticsError::Timeout {
                domain,
                after: self.timeout,
            }),
        }
    }

    pub async fn sales(&self, period: &Period) -> Result<SalesAnalytics, AnalyticsError> {
        self.bounded(Domain::Sales, self.sales.aggregate(period)).await
    }

    pub async fn customers(&self, period: &Period) -> Result<CustomerAnalytics, AnalyticsError> {
        self.bounded(Domain::Customers, self.customers.aggregate(period))
            .await
    }

    pub async fn inventory(&self, period: &Period) -> Result<InventoryAnalytics, AnalyticsError> {
        self.bounded(Domain::Inventory, self.inventory.aggregate(period))
            .await
    }

    pub async fn marketing(&self, period: &Period) -> Result<MarketingAnalytics, AnalyticsError> {
        self.bounded(Domain::Marketing, self.marketing.aggregate(period))
            .await
    }

    pub async fn financial(&self, period: &Period) -> Result<FinancialAnalytics, AnalyticsError> {
        self.bounded(Domain::Financial, self.financial.aggregate(period))
            .await
    }

    /// Aggregate a single domain into a snapshot
    pub async fn aggregate(
        &self,
        domain: Domain,
        period: &Period,
    ) -> Result<DomainSnapshot, AnalyticsError> {
        tracing::debug!(%domain, period = %period.token, "Aggregating analytics");

        let analytics = match domain {
            Domain::Sales => DomainAnalytics::Sales(self.sales(period).await?),
            Domain::Customers => DomainAnalytics::Customers(self.customers(period).await?),
            Domain::Inventory => DomainAnalytics::Inventory(self.inventory(period).await?),
            Domain::Marketing => DomainAnalytics::Marketing(self.marketing(period).await?),
            Domain::Financial => DomainAnalytics::Financial(self.financial(period).await?),
        };

        Ok(DomainSnapshot::new(*period, analytics))
    }

    /// All five domains over the same period, aggregated concurrently
    pub async fn dashboard(&self, period: &Period) -> Result<Dashboard, AnalyticsError> {
        tracing::debug!(period = %period.token, "Aggregating dashboard");

        let (sales, customers, inventory, marketing, financial) = tokio::try_join!(
            self.sales(period),
            self.customers(period),
            self.inventory(period),
            self.marketing(period),
            self.financial(period),
        )?;

        Ok(Dashboard {
            period: *period,
            sales,
            customers,
            inventory,
            marketing,
            financial,
        })
    }
}
