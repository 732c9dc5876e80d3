use serde::{Deserialize, Serialize};

use super::patch::deserialize_timestamp_patch;
use super::timestamp::{deserialize_optional_timestamp, Timestamp};
use super::{Patch, Record, RecordId};

/// Agency customer. `last_visit` drives the inactivity sweep and stays empty
/// until a visit is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(rename = "nombre", default)]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(
        rename = "ultimaVisita",
        default,
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub last_visit: Option<Timestamp>,
}

/// Client body accepted by create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientFields {
    #[serde(rename = "nombre", default, skip_serializing_if = "Patch::is_keep")]
    pub first_name: Patch<String>,
    #[serde(rename = "apellido", default, skip_serializing_if = "Patch::is_keep")]
    pub last_name: Patch<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Patch::is_keep")]
    pub address: Patch<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Patch::is_keep")]
    pub phone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub email: Patch<String>,
    #[serde(
        rename = "ultimaVisita",
        default,
        deserialize_with = "deserialize_timestamp_patch",
        skip_serializing_if = "Patch::is_keep"
    )]
    pub last_visit: Patch<Timestamp>,
}

impl Client {
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect();

        if parts.is_empty() {
            format!("client {}", self.id)
        } else {
            parts.join(" ")
        }
    }
}

impl Record for Client {
    const COLLECTION: &'static str = "clientes";
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["ultimaVisita"];

    type Fields = ClientFields;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: ClientFields) -> Self {
        Self {
            id,
            first_name: fields.first_name.into_option(),
            last_name: fields.last_name.into_option(),
            address: fields.address.into_option(),
            phone: fields.phone.into_option(),
            email: fields.email.into_option(),
            last_visit: fields.last_visit.into_option(),
        }
    }

    fn apply(&mut self, changes: ClientFields) {
        changes.first_name.apply_to(&mut self.first_name);
        changes.last_name.apply_to(&mut self.last_name);
        changes.address.apply_to(&mut self.address);
        changes.phone.apply_to(&mut self.phone);
        changes.email.apply_to(&mut self.email);
        changes.last_visit.apply_to(&mut self.last_visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ana() -> Client {
        Client::from_fields(
            RecordId("c-1".to_string()),
            ClientFields {
                first_name: Patch::Set("Ana".to_string()),
                last_name: Patch::Set("Ruiz".to_string()),
                phone: Patch::Set("111".to_string()),
                ..ClientFields::default()
            },
        )
    }

    #[test]
    fn new_clients_serialize_a_null_last_visit() {
        let value = serde_json::to_value(ana()).expect("serializes");
        assert_eq!(value["_id"], json!("c-1"));
        assert_eq!(value["nombre"], json!("Ana"));
        assert_eq!(value["ultimaVisita"], serde_json::Value::Null);
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut client = ana();
        let changes: ClientFields =
            serde_json::from_value(json!({ "telefono": "555" })).expect("valid body");
        client.apply(changes);

        assert_eq!(client.phone.as_deref(), Some("555"));
        assert_eq!(client.first_name.as_deref(), Some("Ana"));
        assert_eq!(client.last_name.as_deref(), Some("Ruiz"));
        assert!(client.last_visit.is_none());
    }

    #[test]
    fn explicit_null_clears_the_last_visit() {
        let mut client = ana();
        client.last_visit = crate::domain::parse_timestamp("2024-01-01").ok();
        assert!(client.last_visit.is_some());

        let changes: ClientFields =
            serde_json::from_value(json!({ "ultimaVisita": null, "email": null }))
                .expect("valid body");
        assert_eq!(changes.last_visit, Patch::Clear);
        client.apply(changes);

        assert!(client.last_visit.is_none());
        assert!(client.email.is_none());
        assert_eq!(client.phone.as_deref(), Some("111"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_value::<ClientFields>(json!({ "apodo": "La Flaca" }));
        assert!(result.is_err());
    }

    #[test]
    fn full_name_falls_back_to_identifier() {
        let anonymous = Client::from_fields(RecordId("c-9".to_string()), ClientFields::default());
        assert_eq!(anonymous.full_name(), "client c-9");
        assert_eq!(ana().full_name(), "Ana Ruiz");
    }
}
