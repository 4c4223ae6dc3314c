//! Test support
//!
//! `fixtures` builds store records and domain rows with sensible defaults;
//! `mocks` holds the in-memory store, report ledger and stub exporter that
//! stand in for PostgreSQL and the file exporters.
//!
//! The store fakes group and order rows the way the SQL adapters do, so
//! aggregator tests exercise real arithmetic rather than canned answers.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
