//! S3-backed blob store.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::StorageError;
use crate::store::traits::BlobStore;

/// Blob store over one S3 bucket.
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_no_such_key() {
                    StorageError::NotFound {
                        bucket: self.bucket.clone(),
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Request {
                        op: "get",
                        key: key.to_string(),
                        reason: service.to_string(),
                    }
                }
            })?;

        let bytes = object
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Request {
                op: "get",
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        Ok(bytes.into_bytes().to_vec())
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::Request {
                op: "put",
                key: key.to_string(),
                reason: e.into_service_error().to_string(),
            })?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Request {
                op: "delete",
                key: key.to_string(),
                reason: e.into_service_error().to_string(),
            })?;
        Ok(())
    }
}
