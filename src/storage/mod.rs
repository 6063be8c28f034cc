//! Persistence for the contact collection.
//!
//! The ledger owns a [`ContactStore`] behind a trait object so tests can swap
//! in an in-memory implementation. The production store is
//! [`JsonFileStore`]: one JSON file holding the full ordered collection,
//! rewritten wholesale after every accepted submission. That is a linear cost
//! per write and a deliberate scalability ceiling: the target collection size
//! is a few hundred records.

pub mod json_file;

pub use json_file::JsonFileStore;

use crate::models::ContactRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while loading or saving the snapshot.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying file I/O failed
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot contents could not be (de)serialized
    #[error("Snapshot serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable storage for the ordered contact collection.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Load the persisted collection.
    ///
    /// A missing snapshot is not an error: it returns an empty collection.
    /// An unreadable or unparsable snapshot is an error; the caller decides
    /// whether that is fatal (at startup it is not).
    async fn load(&self) -> StoreResult<Vec<ContactRecord>>;

    /// Rewrite the full collection.
    async fn save(&self, records: &[ContactRecord]) -> StoreResult<()>;
}
