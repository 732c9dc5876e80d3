use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::policy::{classify, inactivity_offer, ReviewDecision, ReviewStatus};
use crate::domain::{Client, Offer, Timestamp};
use crate::store::{AgencyStore, Repository, RepositoryError};

/// One line of a sweep report: the client as it looked before the sweep
/// touched it, and what happened to it.
#[derive(Debug, Clone, Serialize)]
pub struct ClientReview {
    #[serde(rename = "cliente")]
    pub client: Client,
    pub status: ReviewStatus,
}

/// Tally of a finished sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub active: usize,
    pub offers_created: usize,
    pub deleted: usize,
}

impl SweepSummary {
    pub fn from_reviews(reviews: &[ClientReview]) -> Self {
        reviews
            .iter()
            .fold(Self::default(), |mut summary, review| {
                match review.status {
                    ReviewStatus::Active => summary.active += 1,
                    ReviewStatus::OfferCreated => summary.offers_created += 1,
                    ReviewStatus::Deleted => summary.deleted += 1,
                }
                summary
            })
    }
}

/// Walks the client collection and applies the inactivity policy.
///
/// Clients are handled one at a time. A store failure stops the run; side
/// effects already applied to earlier clients stay in place.
pub struct InactivitySweep {
    clients: Arc<dyn Repository<Client>>,
    offers: Arc<dyn Repository<Offer>>,
}

impl InactivitySweep {
    pub fn new(clients: Arc<dyn Repository<Client>>, offers: Arc<dyn Repository<Offer>>) -> Self {
        Self { clients, offers }
    }

    pub fn from_store(store: &AgencyStore) -> Self {
        Self::new(store.clients.clone(), store.offers.clone())
    }

    /// Classify every client at `now` and apply the resulting side effects.
    pub async fn review(&self, now: Timestamp) -> Result<Vec<ClientReview>, SweepError> {
        let clients = self.clients.list().await?;
        let mut reviews = Vec::with_capacity(clients.len());

        for client in clients {
            let decision = classify(&client, now);
            let status = self.apply(&client, decision, now).await?;
            reviews.push(ClientReview { client, status });
        }

        let summary = SweepSummary::from_reviews(&reviews);
        info!(
            reviewed = reviews.len(),
            active = summary.active,
            offers_created = summary.offers_created,
            deleted = summary.deleted,
            "inactivity sweep finished"
        );
        Ok(reviews)
    }

    /// Run the side effect for a single decision.
    pub async fn apply(
        &self,
        client: &Client,
        decision: ReviewDecision,
        now: Timestamp,
    ) -> Result<ReviewStatus, SweepError> {
        match decision {
            ReviewDecision::Delete { months } => {
                let removed = self.clients.delete(&client.id).await?;
                info!(id = %client.id, months, removed, "client removed for inactivity");
            }
            ReviewDecision::IssueOffer { months } => {
                let offer = self
                    .offers
                    .insert(inactivity_offer(client.id.clone(), now))
                    .await?;
                info!(id = %client.id, offer = %offer.id, months, "inactivity offer issued");
            }
            ReviewDecision::Retain { months } => {
                debug!(id = %client.id, months, "client active");
            }
            ReviewDecision::Exempt => {
                debug!(id = %client.id, "client has no recorded visit");
            }
        }

        Ok(decision.status())
    }
}

/// Error raised when the sweep cannot read or write the store.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("inactivity sweep aborted: {0}")]
    Repository(#[from] RepositoryError),
}
