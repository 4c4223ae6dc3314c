//! Financial aggregator

use std::sync::Arc;

use crate::app::metrics::profit_margin;
use crate::domain::entities::{FinancialAnalytics, FinancialOverview, InvoiceStatus, Period};
use crate::domain::ports::FinancialRepository;
use crate::error::DomainError;

pub struct FinancialAggregator<R>
where
    R: FinancialRepository,
{
    repo: Arc<R>,
}

impl<R> FinancialAggregator<R>
where
    R: FinancialRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn aggregate(&self, period: &Period) -> Result<FinancialAnalytics, DomainError> {
        let total_revenue = self.repo.invoice_total(period, InvoiceStatus::Paid).await?;
        let total_expenses = self.repo.expense_total(period).await?;
        let pending_amount = self.repo.invoice_total(period, InvoiceStatus::Pending).await?;
        let overdue_amount = self.repo.invoice_total(period, InvoiceStatus::Overdue).await?;

        let pending_invoices = self.repo.invoices(period, InvoiceStatus::Pending).await?;
        let paid_invoices = self.repo.invoices(period, InvoiceStatus::Paid).await?;
        let overdue_invoices = self.repo.invoices(period, InvoiceStatus::Overdue).await?;
        let expenses_by_category = self.repo.expenses_by_category(period).await?;

        let net_income = total_revenue - total_expenses;

        let overview = FinancialOverview {
            total_revenue,
            total_expenses,
            net_income,
            profit_margin: profit_margin(net_income, total_revenue),
            pending_invoices: pending_amount,
            overdue_invoices: overdue_amount,
        };

        Ok(FinancialAnalytics {
            overview,
            pending_invoices,
            paid_invoices,
            overdue_invoices,
            expenses_by_category,
        })
    }
}
