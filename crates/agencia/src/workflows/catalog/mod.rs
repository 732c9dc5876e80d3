//! Create, list and update for clients, vehicles, services and offers.
//!
//! These are straight pass-throughs to the store. The one rule applied on the
//! way in is the offer expiration stamp.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::catalog_router;
pub use service::{CatalogError, CatalogService};
