use std::marker::PhantomData;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

use super::{Repository, RepositoryError, StoreError};
use crate::domain::{parse_timestamp, Record, RecordId};

const APP_NAME: &str = "agencia";

/// Connect to `uri` and ping `database` so an unreachable server fails at
/// startup rather than on the first request.
pub async fn connect(uri: &str, database: &str) -> Result<Database, StoreError> {
    let mut options = ClientOptions::parse(uri)
        .await
        .map_err(|err| StoreError::Connect(err.to_string()))?;
    options.app_name = Some(APP_NAME.to_string());

    let client =
        Client::with_options(options).map_err(|err| StoreError::Connect(err.to_string()))?;
    let database = client.database(database);

    database
        .run_command(doc! { "ping": 1 }, None)
        .await
        .map_err(|err| StoreError::Connect(err.to_string()))?;

    info!(database = %database.name(), "connected to MongoDB");
    Ok(database)
}

/// Collection stored in MongoDB. Identifiers are `ObjectId`s rendered as hex.
pub struct MongoRepository<R> {
    collection: Collection<Document>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> MongoRepository<R> {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection::<Document>(R::COLLECTION),
            _record: PhantomData,
        }
    }
}

fn unavailable(err: mongodb::error::Error) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

fn corrupt(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Corrupt(err.to_string())
}

/// Serialize a body for MongoDB. Timestamp fields become BSON dates and
/// references that parse as ObjectIds are stored as ObjectIds, matching
/// documents written by other clients of the same database.
fn encode<R: Record>(fields: &R::Fields) -> Result<Document, RepositoryError> {
    let mut document = bson::to_document(fields).map_err(corrupt)?;

    for key in R::TIMESTAMP_FIELDS {
        let converted = match document.get(*key) {
            Some(Bson::String(raw)) => {
                let instant = parse_timestamp(raw).map_err(RepositoryError::Corrupt)?;
                Some(bson::DateTime::from_millis(instant.timestamp_millis()))
            }
            _ => None,
        };
        if let Some(instant) = converted {
            document.insert(*key, instant);
        }
    }

    for key in R::REFERENCE_FIELDS {
        let converted = match document.get(*key) {
            Some(Bson::String(raw)) => ObjectId::parse_str(raw).ok(),
            _ => None,
        };
        if let Some(oid) = converted {
            document.insert(*key, oid);
        }
    }

    Ok(document)
}

/// Read a stored document back: ObjectIds become hex strings and BSON dates
/// become RFC 3339 strings before the record is deserialized.
fn decode<R: Record>(document: Document) -> Result<R, RepositoryError> {
    let mut normalized = Document::new();
    for (key, value) in document {
        let value = match value {
            Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
            Bson::DateTime(instant) => {
                Bson::String(instant.try_to_rfc3339_string().map_err(corrupt)?)
            }
            other => other,
        };
        normalized.insert(key, value);
    }
    bson::from_document(normalized).map_err(corrupt)
}

// Ids that are not valid ObjectIds cannot name a stored document.
fn object_id(id: &RecordId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_str()).ok()
}

#[async_trait]
impl<R: Record> Repository<R> for MongoRepository<R> {
    async fn insert(&self, fields: R::Fields) -> Result<R, RepositoryError> {
        let document = encode::<R>(&fields)?;
        let result = self
            .collection
            .insert_one(document, None)
            .await
            .map_err(unavailable)?;

        let id = match result.inserted_id {
            Bson::ObjectId(oid) => RecordId(oid.to_hex()),
            other => RecordId(other.to_string()),
        };
        debug!(collection = R::COLLECTION, %id, "document inserted");
        Ok(R::from_fields(id, fields))
    }

    async fn list(&self) -> Result<Vec<R>, RepositoryError> {
        let mut cursor = self
            .collection
            .find(doc! {}, None)
            .await
            .map_err(unavailable)?;

        let mut records = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(unavailable)? {
            records.push(decode(document)?);
        }
        Ok(records)
    }

    async fn fetch(&self, id: &RecordId) -> Result<Option<R>, RepositoryError> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(unavailable)?
            .map(decode)
            .transpose()
    }

    async fn update(
        &self,
        id: &RecordId,
        changes: R::Fields,
    ) -> Result<Option<R>, RepositoryError> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        let changes = encode::<R>(&changes)?;
        if changes.is_empty() {
            // `$set` refuses an empty document.
            return self.fetch(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": changes }, options)
            .await
            .map_err(unavailable)?
            .map(decode)
            .transpose()
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, RepositoryError> {
        let Some(oid) = object_id(id) else {
            return Ok(false);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(unavailable)?;
        Ok(result.deleted_count > 0)
    }
}
