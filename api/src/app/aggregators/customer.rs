//! Customer aggregator

use std::collections::HashMap;
use std::sync::Arc;

use crate::app::metrics::{churn_rate, ltv_bucket};
use crate::domain::entities::{
    CustomerAnalytics, CustomerOverview, LtvBucket, LtvBucketCount, Period,
};
use crate::domain::ports::CustomerRepository;
use crate::error::DomainError;

use super::TOP_N;

pub struct CustomerAggregator<R>
where
    R: CustomerRepository,
{
    repo: Arc<R>,
}

impl<R> CustomerAggregator<R>
where
    R: CustomerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn aggregate(&self, period: &Period) -> Result<CustomerAnalytics, DomainError> {
        let total_customers = self.repo.count_customers().await?;
        let new_customers = self.repo.count_new_customers(period).await?;
        let returning_customers = self.repo.count_returning_customers(period).await?;
        let top_customers = self.repo.top_customers_by_spend(period, TOP_N).await?;
        let customers_by_location = self.repo.customers_by_location().await?;
        let lifetime_spend = self.repo.lifetime_spend().await?;

        let overview = CustomerOverview {
            total_customers,
            new_customers,
            returning_customers,
            churn_rate: churn_rate(total_customers, new_customers, returning_customers),
        };

        Ok(CustomerAnalytics {
            overview,
            top_customers,
            customers_by_location,
            customer_lifetime_value: bucket_counts(&lifetime_spend),
        })
    }
}

/// Count customers per LTV bucket, always emitting all three buckets in order
fn bucket_counts(lifetime_spend: &[f64]) -> Vec<LtvBucketCount> {
    let mut counts: HashMap<LtvBucket, i64> = HashMap::new();
    for spend in lifetime_spend {
        *counts.entry(ltv_bucket(*spend)).or_default() += 1;
    }

    LtvBucket::ALL
        .iter()
        .map(|bucket| LtvBucketCount {
            bucket: *bucket,
            customers: counts.get(bucket).copied().unwrap_or(0),
        })
        .collect()
}
