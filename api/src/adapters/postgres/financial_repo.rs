//! PostgreSQL adapter for FinancialRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::domain::entities::{ExpenseCategory, Invoice, InvoiceStatus, Period};
use crate::domain::ports::FinancialRepository;
use crate::entity::{expenses, invoices};
use crate::error::DomainError;

/// PostgreSQL implementation of FinancialRepository
pub struct PostgresFinancialRepository {
    db: DatabaseConnection,
}

impl PostgresFinancialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FinancialRepository for PostgresFinancialRepository {
    async fn invoice_total(
        &self,
        period: &Period,
        status: InvoiceStatus,
    ) -> Result<f64, DomainError> {
        let result: Option<Option<f64>> = invoices::Entity::find()
            .filter(invoices::Column::Status.eq(status.to_string()))
            .filter(invoices::Column::IssuedAt.between(period.start, period.end))
            .select_only()
            .column_as(Expr::col(invoices::Column::Amount).sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.flatten().unwrap_or(0.0))
    }

    async fn invoices(
        &self,
        period: &Period,
        status: InvoiceStatus,
    ) -> Result<Vec<Invoice>, DomainError> {
        let query = invoices::Entity::find()
            .filter(invoices::Column::Status.eq(status.to_string()))
            .filter(invoices::Column::IssuedAt.between(period.start, period.end));

        let query = match status {
            InvoiceStatus::Paid => query.order_by_desc(invoices::Column::IssuedAt),
            InvoiceStatus::Pending | InvoiceStatus::Overdue => {
                query.order_by_asc(invoices::Column::DueDate)
            }
        };

        let results = query
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Invoice::try_from).collect()
    }

    async fn expense_total(&self, period: &Period) -> Result<f64, DomainError> {
        let result: Option<Option<f64>> = expenses::Entity::find()
            .filter(expenses::Column::IncurredAt.between(period.start, period.end))
            .select_only()
            .column_as(Expr::col(expenses::Column::Amount).sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.flatten().unwrap_or(0.0))
    }

    async fn expenses_by_category(
        &self,
        period: &Period,
    ) -> Result<Vec<ExpenseCategory>, DomainError> {
        let rows: Vec<(String, f64)> = expenses::Entity::find()
            .filter(expenses::Column::IncurredAt.between(period.start, period.end))
            .select_only()
            .column(expenses::Column::Category)
            .column_as(Expr::col(expenses::Column::Amount).sum(), "amount")
            .group_by(expenses::Column::Category)
            .order_by(Expr::col(expenses::Column::Amount).sum(), Order::Desc)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(category, amount)| ExpenseCategory { category, amount })
            .collect())
    }
}

/// Convert SeaORM model to domain entity; the stored status must parse
impl TryFrom<invoices::Model> for Invoice {
    type Error = DomainError;

    fn try_from(model: invoices::Model) -> Result<Self, Self::Error> {
        Ok(Invoice {
            id: model.id,
            invoice_number: model.invoice_number,
            customer_id: model.customer_id,
            amount: model.amount,
            status: model.status.parse().map_err(DomainError::Internal)?,
            issued_at: model.issued_at.with_timezone(&Utc),
            due_date: model.due_date,
            paid_at: model.paid_at.map(|t| t.with_timezone(&Utc)),
        })
    }
}
