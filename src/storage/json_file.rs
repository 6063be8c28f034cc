//! JSON file implementation of [`ContactStore`].

use super::{ContactStore, StoreResult};
use crate::models::ContactRecord;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the collection as a single pretty-printed JSON array.
///
/// The file layout matches the export format: a top-level array of
/// camelCase contact objects, readable and diffable by hand.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The snapshot path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContactStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Vec<ContactRecord>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&data)?)
    }

    async fn save(&self, records: &[ContactRecord]) -> StoreResult<()> {
        let data = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}
