//! Storage backends for raw emails, attachments, and persisted records.

pub mod dynamo;
pub mod memory;
pub mod s3;
pub mod traits;

pub use dynamo::DynamoRecordStore;
pub use memory::{MemoryBlobStore, MemoryRecordStore};
pub use s3::S3BlobStore;
pub use traits::{BlobStore, RecordStore};
