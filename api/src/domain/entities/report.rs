//! Report domain entities
//!
//! A `ReportJob` describes one export request, an exporter turns it into a
//! `ReportArtifact`, and the `ReportLedgerEntry` is the only thing that
//! survives the request. Ledger entries are append-only.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::{Period, PeriodToken};
use super::snapshot::{Domain, MetricRow};

/// Unique identifier for a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub Uuid);

impl ReportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReportId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output format of an exported report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Pdf,
    Excel,
    Csv,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Pdf, ReportFormat::Excel, ReportFormat::Csv];

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Pdf => write!(f, "pdf"),
            ReportFormat::Excel => write!(f, "excel"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "excel" => Ok(ReportFormat::Excel),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!(
                "Invalid format '{}'. Use: pdf, excel, csv",
                s
            )),
        }
    }
}

/// Statement flavours of a financial report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatement {
    IncomeStatement,
    BalanceSheet,
    CashFlow,
}

impl std::fmt::Display for FinancialStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinancialStatement::IncomeStatement => write!(f, "income_statement"),
            FinancialStatement::BalanceSheet => write!(f, "balance_sheet"),
            FinancialStatement::CashFlow => write!(f, "cash_flow"),
        }
    }
}

impl std::str::FromStr for FinancialStatement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income_statement" => Ok(FinancialStatement::IncomeStatement),
            "balance_sheet" => Ok(FinancialStatement::BalanceSheet),
            "cash_flow" => Ok(FinancialStatement::CashFlow),
            _ => Err(format!(
                "Invalid financial report type '{}'. Use: income_statement, balance_sheet, cash_flow",
                s
            )),
        }
    }
}

/// What a report contains
///
/// Stored in the ledger as its display string (`sales`, `income_statement`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ReportType {
    Sales,
    Customers,
    Inventory,
    Marketing,
    Financial(FinancialStatement),
}

impl ReportType {
    /// Build the report type for a domain; financial reports need a statement.
    pub fn for_domain(domain: Domain, statement: Option<&str>) -> Result<Self, String> {
        match domain {
            Domain::Sales => Ok(ReportType::Sales),
            Domain::Customers => Ok(ReportType::Customers),
            Domain::Inventory => Ok(ReportType::Inventory),
            Domain::Marketing => Ok(ReportType::Marketing),
            Domain::Financial => {
                let statement = statement
                    .filter(|s| !s.trim().is_empty())
                    .ok_or_else(|| {
                        "Financial reports require a type: income_statement, balance_sheet, cash_flow"
                            .to_string()
                    })?;
                Ok(ReportType::Financial(statement.parse()?))
            }
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            ReportType::Sales => Domain::Sales,
            ReportType::Customers => Domain::Customers,
            ReportType::Inventory => Domain::Inventory,
            ReportType::Marketing => Domain::Marketing,
            ReportType::Financial(_) => Domain::Financial,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportType::Sales => "Sales Report",
            ReportType::Customers => "Customer Report",
            ReportType::Inventory => "Inventory Report",
            ReportType::Marketing => "Marketing Report",
            ReportType::Financial(FinancialStatement::IncomeStatement) => "Income Statement",
            ReportType::Financial(FinancialStatement::BalanceSheet) => "Balance Sheet",
            ReportType::Financial(FinancialStatement::CashFlow) => "Cash Flow Statement",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Financial(statement) => write!(f, "{}", statement),
            other => write!(f, "{}", other.domain()),
        }
    }
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(statement) = s.parse::<FinancialStatement>() {
            return Ok(ReportType::Financial(statement));
        }
        match s.parse::<Domain>() {
            Ok(Domain::Financial) | Err(_) => Err(format!("Unknown report type: {}", s)),
            Ok(domain) => ReportType::for_domain(domain, None),
        }
    }
}

impl From<ReportType> for String {
    fn from(value: ReportType) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ReportType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raw, unvalidated report request as received from a caller
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub domain: Domain,
    pub period: Option<String>,
    pub format: Option<String>,
    /// Financial statement type (`type` in the request body)
    pub statement: Option<String>,
    pub requested_by: String,
}

/// A validated report request, ready to execute
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub report_type: ReportType,
    pub period: PeriodToken,
    pub format: ReportFormat,
    pub requested_by: String,
    pub created_at: DateTime<Utc>,
}

impl ReportJob {
    /// Validate a raw request. The period is lenient; format and statement are not.
    pub fn from_request(request: ReportRequest) -> Result<Self, String> {
        let format: ReportFormat = request
            .format
            .as_deref()
            .ok_or_else(|| "Missing format. Use: pdf, excel, csv".to_string())?
            .parse()?;
        let report_type = ReportType::for_domain(request.domain, request.statement.as_deref())?;

        Ok(Self {
            report_type,
            period: PeriodToken::parse_lenient(request.period.as_deref()),
            format,
            requested_by: request.requested_by,
            created_at: Utc::now(),
        })
    }
}

/// Dataset handed to an exporter
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub report_type: ReportType,
    pub period: Period,
    pub rows: Vec<MetricRow>,
    pub generated_at: DateTime<Utc>,
}

impl ReportDocument {
    pub fn title(&self) -> &'static str {
        self.report_type.title()
    }
}

/// A rendered report file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportArtifact {
    pub url: String,
    pub filename: String,
    pub format: ReportFormat,
    /// Location on disk; internal only
    #[serde(skip)]
    pub path: PathBuf,
}

/// A persisted ledger row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLedgerEntry {
    pub id: ReportId,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub period: PeriodToken,
    pub format: ReportFormat,
    pub file_url: String,
    pub generated_by: String,
    pub created_at: DateTime<Utc>,
}

/// Data for appending a ledger row
#[derive(Debug, Clone)]
pub struct NewReportLedgerEntry {
    pub report_type: ReportType,
    pub period: PeriodToken,
    pub format: ReportFormat,
    pub file_url: String,
    pub generated_by: String,
}

/// Listing filter for the ledger
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub report_type: Option<ReportType>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: u64,
}

impl ReportFilter {
    pub const DEFAULT_LIMIT: u64 = 50;
    pub const MAX_LIMIT: u64 = 200;

    pub fn matches(&self, entry: &ReportLedgerEntry) -> bool {
        self.report_type.map_or(true, |t| t == entry.report_type)
            && self.from.map_or(true, |from| entry.created_at >= from)
            && self.to.map_or(true, |to| entry.created_at <= to)
    }
}
