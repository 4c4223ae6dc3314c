//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between aggregators, ports, and exporters.

pub mod aggregators;
pub mod analytics_service;
pub mod metrics;
pub mod report_service;
pub mod statements;

pub use analytics_service::AnalyticsService;
pub use report_service::{Exporters, ReportService};
