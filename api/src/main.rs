//! Back-office Analytics API
//!
//! Aggregates sales, customer, inventory, marketing and financial metrics over
//! a reporting period and exports them as PDF, spreadsheet or CSV reports.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

use adapters::{
    file_exporters, ArtifactStore, PostgresCustomerRepository, PostgresFinancialRepository,
    PostgresInventoryRepository, PostgresMarketingRepository, PostgresReportRepository,
    PostgresSalesRepository,
};
use app::{AnalyticsService, Exporters, ReportService};
use config::Config;

type PostgresAnalyticsService = AnalyticsService<
    PostgresSalesRepository,
    PostgresCustomerRepository,
    PostgresInventoryRepository,
    PostgresMarketingRepository,
    PostgresFinancialRepository,
>;

type PostgresReportService = ReportService<
    PostgresSalesRepository,
    PostgresCustomerRepository,
    PostgresInventoryRepository,
    PostgresMarketingRepository,
    PostgresFinancialRepository,
    PostgresReportRepository,
>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub analytics_service: Arc<PostgresAnalyticsService>,
    pub report_service: Arc<PostgresReportService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,backoffice_analytics=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting back-office analytics API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tokio::fs::create_dir_all(&config.reports_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create reports directory {}",
                config.reports_dir.display()
            )
        })?;

    // Create adapters
    let sales_repo = Arc::new(PostgresSalesRepository::new(db.clone()));
    let customer_repo = Arc::new(PostgresCustomerRepository::new(db.clone()));
    let inventory_repo = Arc::new(PostgresInventoryRepository::new(db.clone()));
    let marketing_repo = Arc::new(PostgresMarketingRepository::new(db.clone()));
    let financial_repo = Arc::new(PostgresFinancialRepository::new(db.clone()));
    let report_repo = Arc::new(PostgresReportRepository::new(db.clone()));

    let artifact_store = ArtifactStore::new(
        config.reports_dir.clone(),
        config.reports_base_url.clone(),
    );

    // Create application services
    let analytics_service = Arc::new(AnalyticsService::new(
        sales_repo,
        customer_repo,
        inventory_repo,
        marketing_repo,
        financial_repo,
        config.analytics_timeout,
    ));

    let report_service = Arc::new(ReportService::new(
        analytics_service.clone(),
        report_repo,
        Exporters::new(file_exporters(artifact_store)),
        config.analytics_timeout,
    ));

    // Create app state
    let state = AppState {
        analytics_service,
        report_service,
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Rate-limited routes (report generation writes files)
    let rate_limited_routes = Router::new()
        .route("/analytics/:domain/report", post(handlers::generate_report))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Routes that need a forwarded requester identity
    let identified_routes = Router::new()
        .merge(rate_limited_routes)
        .route("/reports", get(handlers::list_reports))
        .route_layer(middleware::from_fn(auth::requester_middleware));

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/analytics/dashboard", get(handlers::get_dashboard))
        .route("/analytics/:domain", get(handlers::get_domain_analytics))
        .merge(identified_routes)
        // Generated artifacts
        .nest_service("/reports/files", ServeDir::new(&config.reports_dir))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
