use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use super::patch::deserialize_timestamp_patch;
use super::timestamp::{deserialize_optional_timestamp, Timestamp};
use super::{Patch, Record, RecordId};

/// Calendar months an offer stays valid after its base date.
pub const OFFER_GRACE_MONTHS: u32 = 3;

/// Expiration for an offer based on `base`: calendar-month addition, with the
/// day of month clamped to the end of shorter months (Jan 31 -> Apr 30).
/// Saturates at the largest representable instant.
pub fn expiration_from(base: Timestamp) -> Timestamp {
    base.checked_add_months(Months::new(OFFER_GRACE_MONTHS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Time-limited discount tied to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,
    #[serde(
        rename = "fecha",
        default,
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub date: Option<Timestamp>,
    #[serde(rename = "hora", default)]
    pub time: Option<String>,
    #[serde(rename = "costo", default)]
    pub cost: Option<f64>,
    #[serde(rename = "clienteId", default)]
    pub client_id: Option<RecordId>,
    #[serde(
        rename = "expiracion",
        default,
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub expires_at: Option<Timestamp>,
}

/// Stored offer fields. Updates go through this type too, so a caller may
/// overwrite `expires_at` after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferFields {
    #[serde(rename = "tipo", default, skip_serializing_if = "Patch::is_keep")]
    pub kind: Patch<String>,
    #[serde(
        rename = "fecha",
        default,
        deserialize_with = "deserialize_timestamp_patch",
        skip_serializing_if = "Patch::is_keep"
    )]
    pub date: Patch<Timestamp>,
    #[serde(rename = "hora", default, skip_serializing_if = "Patch::is_keep")]
    pub time: Patch<String>,
    #[serde(rename = "costo", default, skip_serializing_if = "Patch::is_keep")]
    pub cost: Patch<f64>,
    #[serde(rename = "clienteId", default, skip_serializing_if = "Patch::is_keep")]
    pub client_id: Patch<RecordId>,
    #[serde(
        rename = "expiracion",
        default,
        deserialize_with = "deserialize_timestamp_patch",
        skip_serializing_if = "Patch::is_keep"
    )]
    pub expires_at: Patch<Timestamp>,
}

/// Body of a new offer. The expiration is never taken from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferSubmission {
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,
    #[serde(
        rename = "fecha",
        default,
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub date: Option<Timestamp>,
    #[serde(rename = "hora", default)]
    pub time: Option<String>,
    #[serde(rename = "costo", default)]
    pub cost: Option<f64>,
    #[serde(rename = "clienteId", default)]
    pub client_id: Option<RecordId>,
}

impl OfferSubmission {
    /// Stamps the expiration. An offer without a date expires relative to `now`.
    pub fn into_fields(self, now: Timestamp) -> OfferFields {
        let expires_at = expiration_from(self.date.unwrap_or(now));

        OfferFields {
            kind: self.kind.into(),
            date: self.date.into(),
            time: self.time.into(),
            cost: self.cost.into(),
            client_id: self.client_id.into(),
            expires_at: Patch::Set(expires_at),
        }
    }
}

impl Record for Offer {
    const COLLECTION: &'static str = "ofertas";
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["fecha", "expiracion"];
    const REFERENCE_FIELDS: &'static [&'static str] = &["clienteId"];

    type Fields = OfferFields;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: OfferFields) -> Self {
        Self {
            id,
            kind: fields.kind.into_option(),
            date: fields.date.into_option(),
            time: fields.time.into_option(),
            cost: fields.cost.into_option(),
            client_id: fields.client_id.into_option(),
            expires_at: fields.expires_at.into_option(),
        }
    }

    fn apply(&mut self, changes: OfferFields) {
        changes.kind.apply_to(&mut self.kind);
        changes.date.apply_to(&mut self.date);
        changes.time.apply_to(&mut self.time);
        changes.cost.apply_to(&mut self.cost);
        changes.client_id.apply_to(&mut self.client_id);
        changes.expires_at.apply_to(&mut self.expires_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn utc(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn expiration_adds_three_calendar_months() {
        assert_eq!(expiration_from(utc(2024, 1, 15)), utc(2024, 4, 15));
        assert_eq!(expiration_from(utc(2024, 11, 20)), utc(2025, 2, 20));
    }

    #[test]
    fn expiration_clamps_to_end_of_shorter_month() {
        assert_eq!(expiration_from(utc(2024, 1, 31)), utc(2024, 4, 30));
        assert_eq!(expiration_from(utc(2023, 11, 30)), utc(2024, 2, 29));
    }

    #[test]
    fn expiration_keeps_time_of_day() {
        let base = Utc.with_ymd_and_hms(2024, 5, 2, 17, 45, 12).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 8, 2, 17, 45, 12).unwrap();
        assert_eq!(expiration_from(base), expected);
    }

    #[test]
    fn expiration_saturates_instead_of_failing() {
        assert_eq!(expiration_from(DateTime::<Utc>::MAX_UTC), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn submission_uses_its_own_date_for_expiration() {
        let submission: OfferSubmission = serde_json::from_value(json!({
            "tipo": "Cambio de aceite",
            "fecha": "2024-01-15",
            "hora": "09:30",
            "costo": 450.0
        }))
        .expect("valid submission");

        let fields = submission.into_fields(utc(2030, 1, 1));
        assert_eq!(fields.date, Patch::Set(utc(2024, 1, 15)));
        assert_eq!(fields.expires_at, Patch::Set(utc(2024, 4, 15)));
    }

    #[test]
    fn undated_submission_expires_relative_to_now() {
        let fields = OfferSubmission::default().into_fields(utc(2024, 6, 10));
        assert_eq!(fields.date, Patch::Clear);
        assert_eq!(fields.expires_at, Patch::Set(utc(2024, 9, 10)));
    }

    #[test]
    fn submission_rejects_caller_supplied_expiration() {
        let result = serde_json::from_value::<OfferSubmission>(json!({
            "fecha": "2024-01-15",
            "expiracion": "2030-01-01"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn updates_may_override_expiration() {
        let mut offer = Offer::from_fields(
            RecordId("o-1".to_string()),
            OfferSubmission::default().into_fields(utc(2024, 1, 1)),
        );
        let changes: OfferFields =
            serde_json::from_value(json!({ "expiracion": "2024-12-31" })).expect("valid body");
        offer.apply(changes);
        assert_eq!(offer.expires_at, Some(utc(2024, 12, 31)));
    }

    #[test]
    fn expiration_serializes_as_rfc3339() {
        let offer = Offer::from_fields(
            RecordId("o-2".to_string()),
            OfferSubmission {
                date: Some(utc(2024, 1, 15)),
                ..OfferSubmission::default()
            }
            .into_fields(utc(2024, 1, 15)),
        );
        let value = serde_json::to_value(&offer).expect("serializes");
        assert_eq!(value["expiracion"], json!("2024-04-15T00:00:00Z"));
    }
}
