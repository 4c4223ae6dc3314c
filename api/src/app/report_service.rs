//! Report service
//!
//! Compiles a report request into an exported file and a ledger entry:
//! validate, resolve the period, build the dataset, render, record.
//! Validation happens before any aggregation or exporter call. There are no
//! retries; a failed render writes no ledger entry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::app::analytics_service::AnalyticsService;
use crate::app::statements::statement_rows;
use crate::domain::entities::{
    FinancialStatement, MetricRow, NewReportLedgerEntry, Period, ReportArtifact, ReportDocument,
    ReportFilter, ReportFormat, ReportJob, ReportLedgerEntry, ReportRequest, ReportType,
};
use crate::domain::ports::{
    CustomerRepository, FinancialRepository, InventoryRepository, MarketingRepository,
    ReportExporter, ReportRepository, SalesRepository,
};
use crate::error::{AnalyticsError, DomainError, ExportError};

/// Exporters keyed by the format they produce
#[derive(Clone, Default)]
pub struct Exporters {
    by_format: HashMap<ReportFormat, Arc<dyn ReportExporter>>,
}

impl Exporters {
    pub fn new(exporters: impl IntoIterator<Item = Arc<dyn ReportExporter>>) -> Self {
        Self {
            by_format: exporters.into_iter().map(|e| (e.format(), e)).collect(),
        }
    }

    pub fn get(&self, format: ReportFormat) -> Option<Arc<dyn ReportExporter>> {
        self.by_format.get(&format).cloned()
    }
}

/// Outcome of a successful compile
#[derive(Debug, Clone)]
pub struct CompiledReport {
    pub artifact: ReportArtifact,
    pub entry: ReportLedgerEntry,
}

pub struct ReportService<S, C, I, M, F, L>
where
    S: SalesRepository,
    C: CustomerRepository,
    I: InventoryRepository,
    M: MarketingRepository,
    F: FinancialRepository,
    L: ReportRepository,
{
    analytics: Arc<AnalyticsService<S, C, I, M, F>>,
    ledger: Arc<L>,
    exporters: Exporters,
    timeout: Duration,
}

impl<S, C, I, M, F, L> ReportService<S, C, I, M, F, L>
where
    S: SalesRepository,
    C: CustomerRepository,
    I: InventoryRepository,
    M: MarketingRepository,
    F: FinancialRepository,
    L: ReportRepository,
{
    pub fn new(
        analytics: Arc<AnalyticsService<S, C, I, M, F>>,
        ledger: Arc<L>,
        exporters: Exporters,
        timeout: Duration,
    ) -> Self {
        Self {
            analytics,
            ledger,
            exporters,
            timeout,
        }
    }

    /// Generate a report file and append it to the ledger
    pub async fn compile(&self, request: ReportRequest) -> Result<CompiledReport, AnalyticsError> {
        let domain = request.domain;
        let job = ReportJob::from_request(request).map_err(AnalyticsError::InvalidInput)?;
        let exporter = self.exporters.get(job.format).ok_or_else(|| {
            AnalyticsError::InvalidInput(format!("No exporter available for '{}'", job.format))
        })?;

        let period = Period::for_token(job.period, job.created_at);
        let rows = self.dataset(job.report_type, &period).await?;
        let document = ReportDocument {
            report_type: job.report_type,
            period,
            rows,
            generated_at: Utc::now(),
        };

        let artifact = match tokio::time::timeout(self.timeout, exporter.render(&document)).await {
            Ok(Ok(artifact)) => artifact,
            Ok(Err(source)) => return Err(AnalyticsError::Export { domain, source }),
            Err(_) => {
                return Err(AnalyticsError::Export {
                    domain,
                    source: ExportError::Timeout(self.timeout),
                })
            }
        };

        let new_entry = NewReportLedgerEntry {
            report_type: job.report_type,
            period: job.period,
            format: job.format,
            file_url: artifact.url.clone(),
            generated_by: job.requested_by,
        };

        let entry = self.ledger.record(&new_entry).await.map_err(|source| {
            tracing::warn!(
                path = %artifact.path.display(),
                report_type = %job.report_type,
                "Report file written but ledger entry failed"
            );
            AnalyticsError::Ledger { domain, source }
        })?;

        tracing::info!(
            report_id = %entry.id,
            report_type = %entry.report_type,
            format = %entry.format,
            generated_by = %entry.generated_by,
            "Generated report {}",
            artifact.filename
        );

        Ok(CompiledReport { artifact, entry })
    }

    /// Flattened metric rows for a report type
    async fn dataset(
        &self,
        report_type: ReportType,
        period: &Period,
    ) -> Result<Vec<MetricRow>, AnalyticsError> {
        match report_type {
            ReportType::Financial(FinancialStatement::BalanceSheet) => {
                let (financial, inventory) = tokio::try_join!(
                    self.analytics.financial(period),
                    self.analytics.inventory(period),
                )?;
                Ok(statement_rows(
                    FinancialStatement::BalanceSheet,
                    &financial,
                    inventory.overview.inventory_value,
                ))
            }
            ReportType::Financial(statement) => {
                let financial = self.analytics.financial(period).await?;
                Ok(statement_rows(statement, &financial, 0.0))
            }
            other => Ok(self
                .analytics
                .aggregate(other.domain(), period)
                .await?
                .metric_rows()),
        }
    }

    /// Ledger entries, newest first
    pub async fn list(&self, mut filter: ReportFilter) -> Result<Vec<ReportLedgerEntry>, DomainError> {
        filter.limit = match filter.limit {
            0 => ReportFilter::DEFAULT_LIMIT,
            n => n.min(ReportFilter::MAX_LIMIT),
        };
        self.ledger.list(&filter).await
    }
}
