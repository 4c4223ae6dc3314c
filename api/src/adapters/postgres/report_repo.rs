//! PostgreSQL adapter for ReportRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    NewReportLedgerEntry, PeriodToken, ReportFilter, ReportId, ReportLedgerEntry,
};
use crate::domain::ports::ReportRepository;
use crate::entity::reports;
use crate::error::DomainError;

/// PostgreSQL implementation of ReportRepository
pub struct PostgresReportRepository {
    db: DatabaseConnection,
}

impl PostgresReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn record(&self, entry: &NewReportLedgerEntry) -> Result<ReportLedgerEntry, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = reports::ActiveModel {
            id: Set(Uuid::new_v4()),
            report_type: Set(entry.report_type.to_string()),
            period: Set(entry.period.to_string()),
            format: Set(entry.format.to_string()),
            file_url: Set(entry.file_url.clone()),
            generated_by: Set(entry.generated_by.clone()),
            created_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.try_into()
    }

    async fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportLedgerEntry>, DomainError> {
        let mut query = reports::Entity::find();

        if let Some(report_type) = filter.report_type {
            query = query.filter(reports::Column::ReportType.eq(report_type.to_string()));
        }
        if let Some(from) = filter.from {
            query = query.filter(reports::Column::CreatedAt.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(reports::Column::CreatedAt.lte(to));
        }

        let results = query
            .order_by_desc(reports::Column::CreatedAt)
            .limit(filter.limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(ReportLedgerEntry::try_from).collect()
    }
}

/// Convert SeaORM model to domain entity; stored strings must parse
impl TryFrom<reports::Model> for ReportLedgerEntry {
    type Error = DomainError;

    fn try_from(model: reports::Model) -> Result<Self, Self::Error> {
        Ok(ReportLedgerEntry {
            id: ReportId(model.id),
            report_type: model.report_type.parse().map_err(DomainError::Internal)?,
            period: model.period.parse::<PeriodToken>().map_err(DomainError::Internal)?,
            format: model.format.parse().map_err(DomainError::Internal)?,
            file_url: model.file_url,
            generated_by: model.generated_by,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}
