//! Marketing analytics types
//!
//! Campaign, promotion, email and social rows are read-only projections of
//! records owned by the marketing back office.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::snapshot::MetricRow;

/// Campaign status counted as active, compared without regard to case
pub const ACTIVE_CAMPAIGN_STATUS: &str = "active";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub channel: String,
    pub status: String,
    pub budget: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: Uuid,
    pub code: String,
    pub discount_percent: f64,
    pub usage_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCampaign {
    pub id: Uuid,
    pub subject: String,
    pub sent_count: i64,
    pub open_count: i64,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaPost {
    pub id: Uuid,
    pub platform: String,
    pub content: String,
    pub likes: i64,
    pub shares: i64,
    pub comments: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingOverview {
    pub total_campaigns: i64,
    pub active_campaigns: i64,
    pub total_promotion_usage: i64,
    pub email_open_rate: f64,
    pub email_click_rate: f64,
}

impl MarketingOverview {
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        vec![
            MetricRow::new("Total Campaigns", self.total_campaigns as f64),
            MetricRow::new("Active Campaigns", self.active_campaigns as f64),
            MetricRow::new("Promotion Usage", self.total_promotion_usage as f64),
            MetricRow::new("Email Open Rate (%)", self.email_open_rate),
            MetricRow::new("Email Click Rate (%)", self.email_click_rate),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingAnalytics {
    pub overview: MarketingOverview,
    pub campaigns: Vec<Campaign>,
    pub promotions: Vec<Promotion>,
    pub email_campaigns: Vec<EmailCampaign>,
    pub social_media_posts: Vec<SocialMediaPost>,
}
