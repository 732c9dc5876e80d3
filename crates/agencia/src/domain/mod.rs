//! Record types stored in the agency's document collections.

pub mod appointment;
pub mod client;
pub mod offer;
pub mod patch;
pub mod timestamp;
pub mod vehicle;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use appointment::{Appointment, AppointmentFields};
pub use client::{Client, ClientFields};
pub use offer::{expiration_from, Offer, OfferFields, OfferSubmission, OFFER_GRACE_MONTHS};
pub use patch::Patch;
pub use timestamp::{parse_timestamp, Timestamp};
pub use vehicle::{Vehicle, VehicleFields};

/// Opaque identifier assigned by the backing store when a record is created.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A flat document living in one collection of the store.
///
/// `Fields` is the body accepted both on create and on update, one [`Patch`]
/// per field: absent fields are left untouched, `null` clears, values overwrite.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Collection name in the backing store.
    const COLLECTION: &'static str;

    /// Wire names of fields holding instants.
    const TIMESTAMP_FIELDS: &'static [&'static str] = &[];

    /// Wire names of fields pointing at another document.
    const REFERENCE_FIELDS: &'static [&'static str] = &[];

    type Fields: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn id(&self) -> &RecordId;

    fn from_fields(id: RecordId, fields: Self::Fields) -> Self;

    fn apply(&mut self, changes: Self::Fields);
}
