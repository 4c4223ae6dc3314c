//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod exporter;
pub mod repositories;

pub use exporter::ReportExporter;
pub use repositories::{
    CustomerRepository, FinancialRepository, InventoryRepository, MarketingRepository,
    ReportRepository, SalesRepository,
};
