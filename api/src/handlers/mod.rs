//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod analytics;
pub mod reports;

pub use analytics::{generate_report, get_dashboard, get_domain_analytics};
pub use reports::list_reports;
