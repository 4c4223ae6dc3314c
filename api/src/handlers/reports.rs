//! Report ledger handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::{ReportFilter, ReportLedgerEntry, ReportType};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing generated reports
#[derive(Debug, Default, Deserialize)]
pub struct ListReportsQuery {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub limit: u64,
}

impl ListReportsQuery {
    fn into_filter(self) -> Result<ReportFilter, AppError> {
        let report_type = self
            .report_type
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.parse::<ReportType>())
            .transpose()
            .map_err(AppError::BadRequest)?;

        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(AppError::BadRequest(
                    "'from' must not be after 'to'".to_string(),
                ));
            }
        }

        Ok(ReportFilter {
            report_type,
            from: self.from,
            to: self.to,
            limit: self.limit,
        })
    }
}

/// GET /reports
///
/// Ledger entries, newest first.
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<Vec<ReportLedgerEntry>>, AppError> {
    let filter = query.into_filter()?;

    let entries = state.report_service.list(filter).await?;

    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FinancialStatement;

    #[test]
    fn parse_list_query_defaults() {
        let query: ListReportsQuery = serde_json::from_str("{}").unwrap();
        let filter = query.into_filter().unwrap();
        assert!(filter.report_type.is_none());
        assert!(filter.from.is_none());
        assert_eq!(filter.limit, 0);
    }

    #[test]
    fn parse_list_query_with_filters() {
        let json = r#"{"type": "balance_sheet", "from": "2024-01-01T00:00:00Z", "limit": 10}"#;
        let query: ListReportsQuery = serde_json::from_str(json).unwrap();
        let filter = query.into_filter().unwrap();
        assert_eq!(
            filter.report_type,
            Some(ReportType::Financial(FinancialStatement::BalanceSheet))
        );
        assert!(filter.from.is_some());
        assert_eq!(filter.limit, 10);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let query = ListReportsQuery {
            report_type: Some("financial".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.into_filter(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let json = r#"{"from": "2024-02-01T00:00:00Z", "to": "2024-01-01T00:00:00Z"}"#;
        let query: ListReportsQuery = serde_json::from_str(json).unwrap();
        assert!(matches!(query.into_filter(), Err(AppError::BadRequest(_))));
    }
}
