//! In-memory storage backends.
//!
//! Used by unit and integration tests in place of the S3 and DynamoDB
//! backends. Both support simple failure injection so orchestrator
//! error paths can be exercised.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{PersistError, StorageError};
use crate::pipeline::types::EmailRecord;
use crate::store::traits::{BlobStore, RecordStore};

/// In-memory blob store backed by a HashMap.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_puts: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object, bypassing the trait.
    pub fn insert(&self, key: &str, bytes: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
    }

    /// Make every subsequent `put` fail.
    pub fn fail_puts(&self) {
        self.fail_puts.store(true, Ordering::Relaxed);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn get_bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: "memory".to_string(),
                key: key.to_string(),
            })
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_puts.load(Ordering::Relaxed) {
            return Err(StorageError::Request {
                op: "put",
                key: key.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.insert(key, bytes);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

/// In-memory record store collecting written records.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<EmailRecord>>,
    fail_writes: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put_record` fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::Relaxed);
    }

    pub fn records(&self) -> Vec<EmailRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put_record(&self, record: &EmailRecord) -> Result<(), PersistError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(PersistError::Write("injected failure".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
