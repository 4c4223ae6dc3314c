//! Derived financial statements
//!
//! Flattened views over a financial snapshot, used as report datasets.

use crate::domain::entities::{FinancialAnalytics, FinancialStatement, MetricRow};

/// Dataset for a statement. The balance sheet also needs the inventory value.
pub fn statement_rows(
    statement: FinancialStatement,
    financial: &FinancialAnalytics,
    inventory_value: f64,
) -> Vec<MetricRow> {
    match statement {
        FinancialStatement::IncomeStatement => income_statement(financial),
        FinancialStatement::BalanceSheet => balance_sheet(financial, inventory_value),
        FinancialStatement::CashFlow => cash_flow(financial),
    }
}

pub fn income_statement(financial: &FinancialAnalytics) -> Vec<MetricRow> {
    let overview = &financial.overview;
    let mut rows = vec![
        MetricRow::new("Revenue", overview.total_revenue),
        MetricRow::new("Expenses", overview.total_expenses),
        MetricRow::new("Net Income", overview.net_income),
        MetricRow::new("Profit Margin (%)", overview.profit_margin),
    ];
    rows.extend(
        financial
            .expenses_by_category
            .iter()
            .map(|e| MetricRow::new(format!("Expense: {}", e.category), e.amount)),
    );
    rows
}

pub fn balance_sheet(financial: &FinancialAnalytics, inventory_value: f64) -> Vec<MetricRow> {
    let overview = &financial.overview;
    vec![
        MetricRow::new("Cash Collected", overview.total_revenue),
        MetricRow::new("Accounts Receivable (Pending)", overview.pending_invoices),
        MetricRow::new("Accounts Receivable (Overdue)", overview.overdue_invoices),
        MetricRow::new(
            "Total Receivables",
            overview.pending_invoices + overview.overdue_invoices,
        ),
        MetricRow::new("Inventory Value", inventory_value),
    ]
}

pub fn cash_flow(financial: &FinancialAnalytics) -> Vec<MetricRow> {
    let overview = &financial.overview;
    vec![
        MetricRow::new("Cash In", overview.total_revenue),
        MetricRow::new("Cash Out", overview.total_expenses),
        MetricRow::new("Net Cash Flow", overview.total_revenue - overview.total_expenses),
        MetricRow::new(
            "Outstanding Receivables",
            overview.pending_invoices + overview.overdue_invoices,
        ),
    ]
}
