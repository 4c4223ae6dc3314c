//! Request identity
//!
//! Authentication itself happens upstream; this layer only lifts the
//! forwarded identity into a typed [`Requester`].

mod requester;

pub use requester::{requester_middleware, Requester};
