//! Inactivity review of the client base.
//!
//! Each run looks at every client's last visit. Clients dormant for more than
//! ten whole months are deleted; clients dormant for more than six get a free
//! "Descuento por inactividad" offer valid for three months. Everyone else,
//! including clients who never had a visit recorded, is left alone.
//!
//! Deletion does not cascade: vehicles, services and offers pointing at a
//! removed client stay where they are.

pub mod policy;
pub mod router;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use policy::{
    classify, elapsed_months, ReviewDecision, ReviewStatus, DELETION_THRESHOLD_MONTHS,
    INACTIVITY_OFFER_KIND, INACTIVITY_OFFER_TIME, OFFER_THRESHOLD_MONTHS,
};
pub use router::inactivity_router;
pub use sweep::{ClientReview, InactivitySweep, SweepError, SweepSummary};
