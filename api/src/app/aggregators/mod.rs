//! Domain aggregators
//!
//! One aggregator per business domain. Each is a pure function of
//! `(period, repository)`: it issues a fixed set of read queries through its
//! injected port and assembles overview + breakdowns. Any failed query fails
//! the whole aggregation; there are no partial snapshots.

pub mod customer;
pub mod financial;
pub mod inventory;
pub mod marketing;
pub mod sales;

pub use customer::CustomerAggregator;
pub use financial::FinancialAggregator;
pub use inventory::InventoryAggregator;
pub use marketing::MarketingAggregator;
pub use sales::SalesAggregator;

/// Length of every top-N breakdown
pub const TOP_N: u64 = 10;
