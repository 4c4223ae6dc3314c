//! Analytics handlers
//!
//! Per-domain snapshots, the combined dashboard and report generation.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::Requester;
use crate::domain::entities::{Dashboard, Domain, DomainSnapshot, Period, ReportLedgerEntry, ReportRequest};
use crate::error::AppError;
use crate::AppState;

/// Query parameters shared by the analytics endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

/// Body of a report generation request
#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub period: Option<String>,
    pub format: Option<String>,
    /// Statement flavour, required for financial reports
    #[serde(rename = "type")]
    pub statement: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub message: String,
    pub report: ReportLedgerEntry,
}

fn parse_domain(raw: &str) -> Result<Domain, AppError> {
    raw.parse().map_err(AppError::NotFound)
}

/// GET /analytics/:domain
pub async fn get_domain_analytics(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<DomainSnapshot>, AppError> {
    let domain = parse_domain(&domain)?;
    let period = Period::current(query.period.as_deref());

    let snapshot = state.analytics_service.aggregate(domain, &period).await?;

    Ok(Json(snapshot))
}

/// GET /analytics/dashboard
///
/// All five domains over one period.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Dashboard>, AppError> {
    let period = Period::current(query.period.as_deref());

    let dashboard = state.analytics_service.dashboard(&period).await?;

    Ok(Json(dashboard))
}

/// POST /analytics/:domain/report
///
/// Export the domain's metrics and record the file in the ledger.
pub async fn generate_report(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Extension(requester): Extension<Requester>,
    Json(req): Json<GenerateReportRequest>,
) -> Result<Json<GenerateReportResponse>, AppError> {
    let domain = parse_domain(&domain)?;

    let compiled = state
        .report_service
        .compile(ReportRequest {
            domain,
            period: req.period,
            format: req.format,
            statement: req.statement,
            requested_by: requester.0,
        })
        .await
        .map_err(|e| AppError::Report(domain, e))?;

    Ok(Json(GenerateReportResponse {
        message: format!("{} generated", compiled.entry.report_type.title()),
        report: compiled.entry,
    }))
}
