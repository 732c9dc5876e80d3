use crate::infra::sweep_instant;
use agencia::config::{AppConfig, StoreKind};
use agencia::domain::{
    AppointmentFields, ClientFields, OfferSubmission, Patch, Record, Timestamp, VehicleFields,
};
use agencia::error::AppError;
use agencia::store::AgencyStore;
use agencia::telemetry;
use agencia::workflows::catalog::CatalogService;
use agencia::workflows::inactivity::{
    classify, ClientReview, InactivitySweep, SweepSummary,
};
use chrono::{Months, NaiveDate};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct ReviewArgs {
    /// Evaluate inactivity as of this date (YYYY-MM-DD, noon UTC). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Override the configured document store (mongo or memory)
    #[arg(long, value_parser = crate::infra::parse_store_kind)]
    pub(crate) store: Option<StoreKind>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluate inactivity as of this date (YYYY-MM-DD, noon UTC). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

/// Run the sweep once, for cron-style scheduling.
pub(crate) async fn run_review(args: ReviewArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(kind) = args.store {
        config.store.kind = kind;
    }
    telemetry::init(&config.telemetry)?;

    let store = AgencyStore::open(&config.store).await?;
    let now = sweep_instant(args.as_of);
    let reviews = InactivitySweep::from_store(&store).review(now).await?;

    println!("Inactivity review ({} store)", config.store.kind);
    render_reviews(now, &reviews);
    Ok(())
}

/// Seed a throwaway agency with clients at different inactivity levels and
/// sweep it.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = sweep_instant(args.as_of);
    let store = AgencyStore::in_memory();
    seed_demo_agency(&store, now).await?;

    println!("Agency demo");
    println!("Before the sweep:");
    for client in store.clients.list().await? {
        let decision = classify(&client, now);
        let months = decision
            .months()
            .map_or_else(|| "no visit".to_string(), |months| format!("{months} months idle"));
        println!("- {} ({months})", client.full_name());
    }

    let reviews = InactivitySweep::from_store(&store).review(now).await?;
    println!();
    render_reviews(now, &reviews);

    let offers = store.offers.list().await?;
    println!("\nOffers on file: {}", offers.len());
    for offer in offers {
        println!(
            "- {} | {} | client {} | expires {}",
            offer.id(),
            offer.kind.as_deref().unwrap_or("-"),
            offer
                .client_id
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            offer
                .expires_at
                .map_or_else(|| "-".to_string(), |at| at.date_naive().to_string()),
        );
    }

    let vehicles = store.vehicles.list().await?;
    println!("Vehicles on file (not cascaded): {}", vehicles.len());
    Ok(())
}

fn render_reviews(now: Timestamp, reviews: &[ClientReview]) {
    println!("Sweep evaluated at {}", now.to_rfc3339());

    if reviews.is_empty() {
        println!("No clients on file");
        return;
    }

    for review in reviews {
        println!(
            "- {} | {} | {}",
            review.client.id,
            review.client.full_name(),
            review.status.label()
        );
    }

    let summary = SweepSummary::from_reviews(reviews);
    println!(
        "Totals: {} active, {} offers created, {} deleted",
        summary.active, summary.offers_created, summary.deleted
    );
}

async fn seed_demo_agency(store: &AgencyStore, now: Timestamp) -> Result<(), AppError> {
    let clients = CatalogService::new(store.clients.clone());
    let vehicles = CatalogService::new(store.vehicles.clone());
    let appointments = CatalogService::new(store.appointments.clone());
    let offers = CatalogService::new(store.offers.clone());

    let profiles = [
        ("Valeria", "Campos", None),
        ("Jorge", "Méndez", Some(2)),
        ("Paola", "Ibarra", Some(8)),
        ("Ricardo", "Solís", Some(14)),
    ];

    for (first_name, last_name, idle_months) in profiles {
        let last_visit = idle_months.and_then(|months| now.checked_sub_months(Months::new(months)));
        let client = clients
            .create(ClientFields {
                first_name: Patch::Set(first_name.to_string()),
                last_name: Patch::Set(last_name.to_string()),
                phone: Patch::Set("555-0100".to_string()),
                email: Patch::Set(format!("{}@example.com", first_name.to_lowercase())),
                last_visit: last_visit.into(),
                ..ClientFields::default()
            })
            .await?;

        vehicles
            .create(VehicleFields {
                make: Patch::Set("Nissan".to_string()),
                model: Patch::Set("Versa".to_string()),
                year: Patch::Set(2018),
                plate: Patch::Set(format!("DEM-{}", plate_suffix(first_name))),
                client_id: Patch::Set(client.id.clone()),
                ..VehicleFields::default()
            })
            .await?;

        if let Some(visit) = last_visit {
            appointments
                .create(AppointmentFields {
                    kind: Patch::Set("Servicio de mantenimiento".to_string()),
                    date: Patch::Set(visit),
                    time: Patch::Set("10:00".to_string()),
                    cost: Patch::Set(1450.0),
                    client_id: Patch::Set(client.id.clone()),
                })
                .await?;
        }
    }

    offers
        .publish(
            OfferSubmission {
                kind: Some("Revisión de frenos".to_string()),
                date: Some(now),
                time: Some("09:00".to_string()),
                cost: Some(299.0),
                client_id: None,
            },
            now,
        )
        .await?;

    Ok(())
}

fn plate_suffix(name: &str) -> String {
    name.chars().take(3).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::parse_date;

    #[tokio::test]
    async fn demo_seed_covers_every_review_outcome() {
        let now = sweep_instant(Some(parse_date("2025-05-20").expect("valid date")));
        let store = AgencyStore::in_memory();
        seed_demo_agency(&store, now).await.expect("seed succeeds");

        let reviews = InactivitySweep::from_store(&store)
            .review(now)
            .await
            .expect("sweep runs");
        let summary = SweepSummary::from_reviews(&reviews);

        assert_eq!(
            summary,
            SweepSummary {
                active: 2,
                offers_created: 1,
                deleted: 1,
            }
        );
        assert_eq!(store.clients.list().await.expect("list").len(), 3);
        assert_eq!(store.vehicles.list().await.expect("list").len(), 4);
        assert_eq!(store.offers.list().await.expect("list").len(), 2);
    }
}
