use serde::{Deserialize, Serialize};

use super::patch::deserialize_timestamp_patch;
use super::timestamp::{deserialize_optional_timestamp, Timestamp};
use super::{Patch, Record, RecordId};

/// A booked or completed service visit ("servicio" on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
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
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppointmentFields {
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
}

impl Record for Appointment {
    const COLLECTION: &'static str = "servicios";
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["fecha"];
    const REFERENCE_FIELDS: &'static [&'static str] = &["clienteId"];

    type Fields = AppointmentFields;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: AppointmentFields) -> Self {
        Self {
            id,
            kind: fields.kind.into_option(),
            date: fields.date.into_option(),
            time: fields.time.into_option(),
            cost: fields.cost.into_option(),
            client_id: fields.client_id.into_option(),
        }
    }

    fn apply(&mut self, changes: AppointmentFields) {
        changes.kind.apply_to(&mut self.kind);
        changes.date.apply_to(&mut self.date);
        changes.time.apply_to(&mut self.time);
        changes.cost.apply_to(&mut self.cost);
        changes.client_id.apply_to(&mut self.client_id);
    }
}
