//! PostgreSQL adapter for MarketingRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::domain::entities::{
    Campaign, EmailCampaign, Period, Promotion, SocialMediaPost, ACTIVE_CAMPAIGN_STATUS,
};
use crate::domain::ports::MarketingRepository;
use crate::entity::{campaigns, email_campaigns, promotions, social_media_posts};
use crate::error::DomainError;

/// PostgreSQL implementation of MarketingRepository
pub struct PostgresMarketingRepository {
    db: DatabaseConnection,
}

impl PostgresMarketingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `LOWER(status) = 'active'`; stored statuses are free-form text
fn active_status() -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(campaigns::Column::Status))).eq(ACTIVE_CAMPAIGN_STATUS)
}

#[async_trait]
impl MarketingRepository for PostgresMarketingRepository {
    async fn campaigns(&self, period: &Period) -> Result<Vec<Campaign>, DomainError> {
        let results = campaigns::Entity::find()
            .filter(campaigns::Column::CreatedAt.between(period.start, period.end))
            .order_by_desc(campaigns::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn count_active_campaigns(&self) -> Result<i64, DomainError> {
        let count = campaigns::Entity::find()
            .filter(active_status())
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count as i64)
    }

    async fn promotions(&self, period: &Period) -> Result<Vec<Promotion>, DomainError> {
        let results = promotions::Entity::find()
            .filter(promotions::Column::CreatedAt.between(period.start, period.end))
            .order_by_desc(promotions::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn email_campaigns(&self, period: &Period) -> Result<Vec<EmailCampaign>, DomainError> {
        let results = email_campaigns::Entity::find()
            .filter(email_campaigns::Column::CreatedAt.between(period.start, period.end))
            .order_by_desc(email_campaigns::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn social_media_posts(
        &self,
        period: &Period,
    ) -> Result<Vec<SocialMediaPost>, DomainError> {
        let results = social_media_posts::Entity::find()
            .filter(social_media_posts::Column::CreatedAt.between(period.start, period.end))
            .order_by_desc(social_media_posts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

impl From<campaigns::Model> for Campaign {
    fn from(model: campaigns::Model) -> Self {
        Campaign {
            id: model.id,
            name: model.name,
            channel: model.channel,
            status: model.status,
            budget: model.budget,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<promotions::Model> for Promotion {
    fn from(model: promotions::Model) -> Self {
        Promotion {
            id: model.id,
            code: model.code,
            discount_percent: model.discount_percent,
            usage_count: model.usage_count as i64,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<email_campaigns::Model> for EmailCampaign {
    fn from(model: email_campaigns::Model) -> Self {
        EmailCampaign {
            id: model.id,
            subject: model.subject,
            sent_count: model.sent_count as i64,
            open_count: model.open_count as i64,
            click_count: model.click_count as i64,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<social_media_posts::Model> for SocialMediaPost {
    fn from(model: social_media_posts::Model) -> Self {
        SocialMediaPost {
            id: model.id,
            platform: model.platform,
            content: model.content,
            likes: model.likes as i64,
            shares: model.shares as i64,
            comments: model.comments as i64,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
