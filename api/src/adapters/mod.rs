//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod export;
pub mod postgres;

pub use export::{file_exporters, ArtifactStore};
pub use postgres::{
    PostgresCustomerRepository, PostgresFinancialRepository, PostgresInventoryRepository,
    PostgresMarketingRepository, PostgresReportRepository, PostgresSalesRepository,
};
