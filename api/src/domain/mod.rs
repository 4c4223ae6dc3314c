//! Domain layer
//!
//! Pure analytics and reporting types with no store or transport dependencies.
//! - `entities`: periods, per-domain snapshots, report ledger types
//! - `ports`: traits the engine requires from stores and exporters

pub mod entities;
pub mod ports;
