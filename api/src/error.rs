//! Unified error types for the analytics API
//!
//! This module defines error types for each layer:
//! - `DomainError`: repository / store errors
//! - `ExportError`: exporter rendering (csv / zip / pdf) and file-system errors
//! - `AnalyticsError`: engine errors, each carrying an `ErrorKind`
//! - `AppError`: HTTP layer errors (wraps engine errors for responses)

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::Domain;

/// Domain layer errors - raised by repository ports
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Exporter errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Rendering timed out after {0:?}")]
    Timeout(Duration),
}

/// Coarse classification of engine failures, used for status mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    UpstreamFailure,
    ExportFailure,
    LedgerFailure,
}

/// Analytics engine errors
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to fetch {domain} analytics: {source}")]
    Upstream { domain: Domain, source: DomainError },

    #[error("Timed out fetching {domain} analytics after {after:?}")]
    Timeout { domain: Domain, after: Duration },

    #[error("Failed to export {domain} report: {source}")]
    Export { domain: Domain, source: ExportError },

    #[error("Failed to record {domain} report: {source}")]
    Ledger { domain: Domain, source: DomainError },
}

impl AnalyticsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyticsError::InvalidInput(_) => ErrorKind::InvalidInput,
            AnalyticsError::Upstream { .. } | AnalyticsError::Timeout { .. } => {
                ErrorKind::UpstreamFailure
            }
            AnalyticsError::Export { .. } => ErrorKind::ExportFailure,
            AnalyticsError::Ledger { .. } => ErrorKind::LedgerFailure,
        }
    }

    pub fn domain(&self) -> Option<Domain> {
        match self {
            AnalyticsError::InvalidInput(_) => None,
            AnalyticsError::Upstream { domain, .. }
            | AnalyticsError::Timeout { domain, .. }
            | AnalyticsError::Export { domain, .. }
            | AnalyticsError::Ledger { domain, .. } => Some(*domain),
        }
    }

    fn is_timeout(&self) -> bool {
        matches!(
            self,
            AnalyticsError::Timeout { .. }
                | AnalyticsError::Export {
                    source: ExportError::Timeout(_),
                    ..
                }
        )
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    /// Failure while fetching analytics
    #[error("{0}")]
    Analytics(#[from] AnalyticsError),

    /// Failure while generating a report for the given domain
    #[error("Report generation failed: {1}")]
    Report(Domain, AnalyticsError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Status for an engine failure; invalid input is the caller's fault,
/// an expired deadline is a gateway timeout, everything else is ours.
fn engine_status(e: &AnalyticsError) -> StatusCode {
    match e.kind() {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        _ if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Analytics(e) => match e {
                AnalyticsError::InvalidInput(msg) => {
                    (engine_status(e), "Invalid input".to_string(), Some(msg.clone()))
                }
                _ => {
                    tracing::error!(kind = ?e.kind(), "Analytics error: {}", e);
                    let domain = e
                        .domain()
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "dashboard".to_string());
                    (
                        engine_status(e),
                        format!("Failed to fetch {} analytics", domain),
                        None,
                    )
                }
            },
            AppError::Report(domain, e) => match e {
                AnalyticsError::InvalidInput(msg) => {
                    (engine_status(e), "Invalid input".to_string(), Some(msg.clone()))
                }
                _ => {
                    tracing::error!(kind = ?e.kind(), %domain, "Report error: {}", e);
                    (
                        engine_status(e),
                        format!("Failed to generate {} report", domain),
                        None,
                    )
                }
            },
            AppError::Domain(e) => {
                tracing::error!("Domain error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad request".to_string(),
                Some(msg.clone()),
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "Not found".to_string(), Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse { error, details });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_are_distinct() {
        let invalid = AnalyticsError::InvalidInput("bad format".to_string());
        let upstream = AnalyticsError::Upstream {
            domain: Domain::Sales,
            source: DomainError::Database("down".to_string()),
        };
        let export = AnalyticsError::Export {
            domain: Domain::Sales,
            source: ExportError::Render("broken".to_string()),
        };
        let ledger = AnalyticsError::Ledger {
            domain: Domain::Sales,
            source: DomainError::Database("down".to_string()),
        };

        assert_eq!(invalid.kind(), ErrorKind::InvalidInput);
        assert_eq!(upstream.kind(), ErrorKind::UpstreamFailure);
        assert_eq!(export.kind(), ErrorKind::ExportFailure);
        assert_eq!(ledger.kind(), ErrorKind::LedgerFailure);
    }

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let response = AppError::Report(
            Domain::Sales,
            AnalyticsError::InvalidInput("Invalid format: docx".to_string()),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failure_maps_to_server_error() {
        let response = AppError::Analytics(AnalyticsError::Upstream {
            domain: Domain::Customers,
            source: DomainError::Database("connection reset".to_string()),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let response = AppError::Analytics(AnalyticsError::Timeout {
            domain: Domain::Inventory,
            after: Duration::from_secs(30),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn ledger_failure_maps_to_server_error() {
        let response = AppError::Report(
            Domain::Financial,
            AnalyticsError::Ledger {
                domain: Domain::Financial,
                source: DomainError::Database("insert failed".to_string()),
            },
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn ledger_read_failure_maps_to_server_error() {
        let error: AppError =
            DomainError::Internal("Unknown period token: fortnight".to_string()).into();
        assert!(matches!(error, AppError::Domain(DomainError::Internal(_))));
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
