use chrono::{Datelike, Months};
use serde::{Serialize, Serializer};

use crate::domain::{Client, OfferFields, OfferSubmission, RecordId, Timestamp};

/// Clients idle for more than this many whole months receive an offer.
pub const OFFER_THRESHOLD_MONTHS: i64 = 6;
/// Clients idle for more than this many whole months are removed.
pub const DELETION_THRESHOLD_MONTHS: i64 = 10;

pub const INACTIVITY_OFFER_KIND: &str = "Descuento por inactividad";
pub const INACTIVITY_OFFER_TIME: &str = "12:00";

/// Whole calendar months from `since` to `now`, truncated toward zero.
///
/// This is the largest `n` with `since + n months <= now`, using the same
/// end-of-month clamping as offer expirations. A `since` in the future yields
/// a negative count.
pub fn elapsed_months(since: Timestamp, now: Timestamp) -> i64 {
    if now < since {
        return -elapsed_months(now, since);
    }

    let months = i64::from(now.year() - since.year()) * 12 + i64::from(now.month())
        - i64::from(since.month());

    if months > 0 && !anniversary_reached(since, months, now) {
        months - 1
    } else {
        months
    }
}

fn anniversary_reached(since: Timestamp, months: i64, now: Timestamp) -> bool {
    u32::try_from(months)
        .ok()
        .and_then(|months| since.checked_add_months(Months::new(months)))
        .is_some_and(|anniversary| anniversary <= now)
}

/// Outcome of evaluating one client, before any side effect runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// No visit on record.
    Exempt,
    Retain { months: i64 },
    IssueOffer { months: i64 },
    Delete { months: i64 },
}

impl ReviewDecision {
    pub fn status(self) -> ReviewStatus {
        match self {
            ReviewDecision::Exempt | ReviewDecision::Retain { .. } => ReviewStatus::Active,
            ReviewDecision::IssueOffer { .. } => ReviewStatus::OfferCreated,
            ReviewDecision::Delete { .. } => ReviewStatus::Deleted,
        }
    }

    pub fn months(self) -> Option<i64> {
        match self {
            ReviewDecision::Exempt => None,
            ReviewDecision::Retain { months }
            | ReviewDecision::IssueOffer { months }
            | ReviewDecision::Delete { months } => Some(months),
        }
    }
}

/// Pure classification of a client at `now`.
pub fn classify(client: &Client, now: Timestamp) -> ReviewDecision {
    let Some(last_visit) = client.last_visit else {
        return ReviewDecision::Exempt;
    };

    let months = elapsed_months(last_visit, now);
    if months > DELETION_THRESHOLD_MONTHS {
        ReviewDecision::Delete { months }
    } else if months > OFFER_THRESHOLD_MONTHS {
        ReviewDecision::IssueOffer { months }
    } else {
        ReviewDecision::Retain { months }
    }
}

/// Status reported per client. Serializes as its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    Active,
    OfferCreated,
    Deleted,
}

impl ReviewStatus {
    pub fn label(self) -> &'static str {
        match self {
            ReviewStatus::Active => "Activo",
            ReviewStatus::OfferCreated => "Oferta creada por inactividad de más de 6 meses",
            ReviewStatus::Deleted => "Eliminado por inactividad de más de 10 meses",
        }
    }
}

impl Serialize for ReviewStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// The win-back discount issued to a dormant client at `now`.
pub(crate) fn inactivity_offer(client_id: RecordId, now: Timestamp) -> OfferFields {
    OfferSubmission {
        kind: Some(INACTIVITY_OFFER_KIND.to_string()),
        date: Some(now),
        time: Some(INACTIVITY_OFFER_TIME.to_string()),
        cost: Some(0.0),
        client_id: Some(client_id),
    }
    .into_fields(now)
}
