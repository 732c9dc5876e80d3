use agencia::config::StoreKind;
use agencia::domain::Timestamp;
use chrono::{NaiveDate, NaiveTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_store_kind(raw: &str) -> Result<StoreKind, String> {
    raw.parse::<StoreKind>().map_err(|err| err.to_string())
}

/// The sweep instant for an `--as-of` date: noon UTC that day, or now.
pub(crate) fn sweep_instant(as_of: Option<NaiveDate>) -> Timestamp {
    match as_of {
        Some(date) => {
            let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
            date.and_time(noon).and_utc()
        }
        None => Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parse_date_reports_bad_input() {
        assert!(parse_date(" 2025-02-01 ").is_ok());
        let err = parse_date("01/02/2025").unwrap_err();
        assert!(err.contains("01/02/2025"));
    }

    #[test]
    fn parse_store_kind_accepts_known_backends() {
        assert_eq!(parse_store_kind("memory"), Ok(StoreKind::Memory));
        assert_eq!(parse_store_kind("MongoDB"), Ok(StoreKind::Mongo));
        assert!(parse_store_kind("sqlite").is_err());
    }

    #[test]
    fn sweep_instant_uses_noon_of_the_given_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).expect("valid date");
        assert_eq!(
            sweep_instant(Some(date)),
            Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap()
        );
    }
}
