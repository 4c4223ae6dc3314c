//! Marketing aggregator

use std::sync::Arc;

use crate::app::metrics::rate;
use crate::domain::entities::{MarketingAnalytics, MarketingOverview, Period};
use crate::domain::ports::MarketingRepository;
use crate::error::DomainError;

pub struct MarketingAggregator<R>
where
    R: MarketingRepository,
{
    repo: Arc<R>,
}

impl<R> MarketingAggregator<R>
where
    R: MarketingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn aggregate(&self, period: &Period) -> Result<MarketingAnalytics, DomainError> {
        let campaigns = self.repo.campaigns(period).await?;
        let active_campaigns = self.repo.count_active_campaigns().await?;
        let promotions = self.repo.promotions(period).await?;
        let email_campaigns = self.repo.email_campaigns(period).await?;
        let social_media_posts = self.repo.social_media_posts(period).await?;

        let (sent, opens, clicks) = email_campaigns.iter().fold((0, 0, 0), |(s, o, c), e| {
            (s + e.sent_count, o + e.open_count, c + e.click_count)
        });

        let overview = MarketingOverview {
            total_campaigns: campaigns.len() as i64,
            active_campaigns,
            total_promotion_usage: promotions.iter().map(|p| p.usage_count).sum(),
            email_open_rate: rate(opens as f64, sent as f64),
            email_click_rate: rate(clicks as f64, opens as f64),
        };

        Ok(MarketingAnalytics {
            overview,
            campaigns,
            promotions,
            email_campaigns,
            social_media_posts,
        })
    }
}
