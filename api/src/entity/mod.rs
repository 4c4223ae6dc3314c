//! SeaORM entities
//!
//! Table mappings for the transactional store the analytics engine reads,
//! plus the `reports` ledger it owns.

pub mod campaigns;
pub mod customers;
pub mod email_campaigns;
pub mod expenses;
pub mod invoices;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod promotions;
pub mod reports;
pub mod social_media_posts;
