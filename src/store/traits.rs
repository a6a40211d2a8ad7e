//! Backend-agnostic storage traits — blob objects and persisted records.
//!
//! The pipeline only ever sees these traits; concrete backends (S3,
//! DynamoDB, in-memory fakes) are constructed in `main` or in tests and
//! injected.

use async_trait::async_trait;

use crate::error::{PersistError, StorageError};
use crate::pipeline::types::EmailRecord;

/// Keyed byte-object storage. One instance per bucket.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch an object. Missing keys yield `StorageError::NotFound`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Write an object, replacing any existing one under the key.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Write-only record storage — a single upsert per processed message.
/// The pipeline has no read path.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put_record(&self, record: &EmailRecord) -> Result<(), PersistError>;
}
