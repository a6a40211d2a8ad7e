//! DynamoDB-backed record store.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::PersistError;
use crate::pipeline::types::EmailRecord;
use crate::store::traits::RecordStore;

/// Record store writing one item per processed email.
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table: String,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put_record(&self, record: &EmailRecord) -> Result<(), PersistError> {
        let mut put = self
            .client
            .put_item()
            .table_name(&self.table)
            .item("messageId", AttributeValue::S(record.message_id.clone()))
            .item("date", AttributeValue::S(record.date.to_rfc3339()))
            .item("sender", AttributeValue::S(record.sender.clone()))
            .item("score", AttributeValue::N(record.score.to_string()));

        if let Some(subject) = &record.subject {
            put = put.item("subject", AttributeValue::S(subject.clone()));
        }
        if let Some(body) = &record.body {
            put = put.item("body", AttributeValue::S(body.clone()));
        }
        if let Some(key) = &record.attachment_key {
            put = put.item("attachment", AttributeValue::S(key.clone()));
        }

        put.send()
            .await
            .map_err(|e| PersistError::Write(e.into_service_error().to_string()))?;
        Ok(())
    }
}
