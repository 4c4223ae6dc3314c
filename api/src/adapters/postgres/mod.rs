//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod customer_repo;
pub mod financial_repo;
pub mod inventory_repo;
pub mod marketing_repo;
pub mod report_repo;
pub mod sales_repo;


pub use customer_repo::PostgresCustomerRepository;
pub use financial_repo::PostgresFinancialRepository;
pub use inventory_repo::PostgresInventoryRepository;
pub use marketing_repo::PostgresMarketingRepository;
pub use report_repo::PostgresReportRepository;
pub use sales_repo::PostgresSalesRepository;
