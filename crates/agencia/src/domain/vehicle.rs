use serde::{Deserialize, Serialize};

use super::{Patch, Record, RecordId};

/// Vehicle registered with the agency. `client_id` is advisory: nothing checks
/// that the referenced client exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(rename = "marca", default)]
    pub make: Option<String>,
    #[serde(rename = "modelo", default)]
    pub model: Option<String>,
    #[serde(rename = "anio", default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "placa", default)]
    pub plate: Option<String>,
    #[serde(rename = "clienteId", default)]
    pub client_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleFields {
    #[serde(rename = "marca", default, skip_serializing_if = "Patch::is_keep")]
    pub make: Patch<String>,
    #[serde(rename = "modelo", default, skip_serializing_if = "Patch::is_keep")]
    pub model: Patch<String>,
    #[serde(rename = "anio", default, skip_serializing_if = "Patch::is_keep")]
    pub year: Patch<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub color: Patch<String>,
    #[serde(rename = "placa", default, skip_serializing_if = "Patch::is_keep")]
    pub plate: Patch<String>,
    #[serde(rename = "clienteId", default, skip_serializing_if = "Patch::is_keep")]
    pub client_id: Patch<RecordId>,
}

impl Record for Vehicle {
    const COLLECTION: &'static str = "vehiculos";
    const REFERENCE_FIELDS: &'static [&'static str] = &["clienteId"];

    type Fields = VehicleFields;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: VehicleFields) -> Self {
        Self {
            id,
            make: fields.make.into_option(),
            model: fields.model.into_option(),
            year: fields.year.into_option(),
            color: fields.color.into_option(),
            plate: fields.plate.into_option(),
            client_id: fields.client_id.into_option(),
        }
    }

    fn apply(&mut self, changes: VehicleFields) {
        changes.make.apply_to(&mut self.make);
        changes.model.apply_to(&mut self.model);
        changes.year.apply_to(&mut self.year);
        changes.color.apply_to(&mut self.color);
        changes.plate.apply_to(&mut self.plate);
        changes.client_id.apply_to(&mut self.client_id);
    }
}
