//! Financial analytics types

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::snapshot::MetricRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Overdue => write!(f, "overdue"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            _ => Err(format!("Unknown invoice status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer_id: Option<Uuid>,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub issued_at: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialOverview {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_income: f64,
    pub profit_margin: f64,
    pub pending_invoices: f64,
    pub overdue_invoices: f64,
}

impl FinancialOverview {
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        vec![
            MetricRow::new("Total Revenue", self.total_revenue),
            MetricRow::new("Total Expenses", self.total_expenses),
            MetricRow::new("Net Income", self.net_income),
            MetricRow::new("Profit Margin (%)", self.profit_margin),
            MetricRow::new("Pending Invoices", self.pending_invoices),
            MetricRow::new("Overdue Invoices", self.overdue_invoices),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnalytics {
    pub overview: FinancialOverview,
    /// Ascending by due date
    pub pending_invoices: Vec<Invoice>,
    /// Descending by issue date
    pub paid_invoices: Vec<Invoice>,
    /// Ascending by due date
    pub overdue_invoices: Vec<Invoice>,
    /// Descending by amount
    pub expenses_by_category: Vec<ExpenseCategory>,
}
