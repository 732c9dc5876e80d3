pub mod catalog;
pub mod inactivity;

use std::sync::Arc;

use axum::Router;

use crate::store::AgencyStore;
use catalog::catalog_router;
use inactivity::{inactivity_router, InactivitySweep};

/// Every agency route: the four record collections plus `/revisar-clientes`.
pub fn agency_router(store: &AgencyStore) -> Router {
    let sweep = Arc::new(InactivitySweep::from_store(store));
    catalog_router(store).merge(inactivity_router(sweep))
}
