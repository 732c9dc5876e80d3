//! Document store behind the agency collections.
//!
//! Every collection goes through [`Repository`]; [`AgencyStore`] bundles the
//! four of them into the single handle that handlers and the sweep receive.

pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{StoreConfig, StoreKind};
use crate::domain::{Appointment, Client, Offer, Record, RecordId, Vehicle};

pub use memory::MemoryRepository;
#[cfg(feature = "mongo")]
pub use mongo::MongoRepository;

/// Storage abstraction for one collection.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// Persist a new document and return it with its assigned identifier.
    async fn insert(&self, fields: R::Fields) -> Result<R, RepositoryError>;

    /// Every document in the collection, in the store's enumeration order.
    async fn list(&self) -> Result<Vec<R>, RepositoryError>;

    async fn fetch(&self, id: &RecordId) -> Result<Option<R>, RepositoryError>;

    /// Merge `changes` into an existing document. `None` when the id is unknown.
    async fn update(&self, id: &RecordId, changes: R::Fields)
        -> Result<Option<R>, RepositoryError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: &RecordId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("stored document could not be converted: {0}")]
    Corrupt(String),
}

/// Failure to open the configured backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend '{0}' was not compiled into this build")]
    BackendDisabled(StoreKind),
    #[error("unable to reach the document store: {0}")]
    Connect(String),
}

/// Handle over the four agency collections, opened once at process start.
#[derive(Clone)]
pub struct AgencyStore {
    pub clients: Arc<dyn Repository<Client>>,
    pub vehicles: Arc<dyn Repository<Vehicle>>,
    pub appointments: Arc<dyn Repository<Appointment>>,
    pub offers: Arc<dyn Repository<Offer>>,
}

impl AgencyStore {
    /// Process-local collections sharing one identifier sequence.
    pub fn in_memory() -> Self {
        let sequence = Arc::new(AtomicU64::new(1));

        Self {
            clients: Arc::new(MemoryRepository::with_sequence(sequence.clone())),
            vehicles: Arc::new(MemoryRepository::with_sequence(sequence.clone())),
            appointments: Arc::new(MemoryRepository::with_sequence(sequence.clone())),
            offers: Arc::new(MemoryRepository::with_sequence(sequence)),
        }
    }

    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        match config.kind {
            StoreKind::Memory => Ok(Self::in_memory()),
            StoreKind::Mongo => Self::open_mongo(config).await,
        }
    }

    #[cfg(feature = "mongo")]
    async fn open_mongo(config: &StoreConfig) -> Result<Self, StoreError> {
        let database = mongo::connect(&config.mongo_uri, &config.mongo_database).await?;

        Ok(Self {
            clients: Arc::new(MongoRepository::new(&database)),
            vehicles: Arc::new(MongoRepository::new(&database)),
            appointments: Arc::new(MongoRepository::new(&database)),
            offers: Arc::new(MongoRepository::new(&database)),
        })
    }

    #[cfg(not(feature = "mongo"))]
    async fn open_mongo(config: &StoreConfig) -> Result<Self, StoreError> {
        Err(StoreError::BackendDisabled(config.kind))
    }
}
