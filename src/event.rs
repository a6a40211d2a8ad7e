//! Trigger-event types and validation.
//!
//! The pipeline is invoked with an SES-style delivery notification. Only
//! the first mail record of an event is processed; the notification format
//! allows more but the upstream trigger never batches.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::EventError;

// ── Wire format ─────────────────────────────────────────────────────

/// Top-level trigger event as delivered by the mail-receiving service.
#[derive(Debug, Deserialize)]
pub struct TriggerEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

/// One notification record.
#[derive(Debug, Deserialize)]
pub struct EventRecord {
    pub ses: SesRecord,
}

#[derive(Debug, Deserialize)]
pub struct SesRecord {
    pub mail: MailMetadata,
}

/// Mail-delivery metadata embedded in the notification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailMetadata {
    pub message_id: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub common_headers: CommonHeaders,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommonHeaders {
    pub subject: Option<String>,
}

// ── Validated form ──────────────────────────────────────────────────

/// A validated inbound email notification. Immutable once built.
#[derive(Debug, Clone)]
pub struct InboundEmail {
    /// Opaque unique id; also the raw blob's key in the source bucket.
    pub message_id: String,
    /// Envelope sender address.
    pub sender: String,
    /// Subject header, if any.
    pub subject: Option<String>,
    /// Delivery timestamp.
    pub received_at: DateTime<Utc>,
}

impl TriggerEvent {
    /// Parse an event from its JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Validate the event and extract the first mail record.
    pub fn into_inbound(mut self) -> Result<InboundEmail, EventError> {
        if self.records.is_empty() {
            return Err(EventError::NoRecords);
        }
        let mail = self.records.remove(0).ses.mail;

        if mail.message_id.trim().is_empty() {
            return Err(EventError::MissingField("messageId"));
        }
        if mail.source.trim().is_empty() {
            return Err(EventError::MissingField("source"));
        }

        Ok(InboundEmail {
            message_id: mail.message_id,
            sender: mail.source,
            subject: mail.common_headers.subject,
            received_at: mail.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_json(message_id: &str, source: &str) -> String {
        format!(
            r#"{{"Records":[{{"ses":{{"mail":{{
                "messageId":"{message_id}",
                "source":"{source}",
                "timestamp":"2024-05-01T10:30:00Z",
                "commonHeaders":{{"subject":"Quarterly report"}}
            }}}}}}]}}"#
        )
    }

    #[test]
    fn parses_and_validates_first_record() {
        let event = TriggerEvent::from_json(&event_json("abc123", "alice@example.com")).unwrap();
        let inbound = event.into_inbound().unwrap();

        assert_eq!(inbound.message_id, "abc123");
        assert_eq!(inbound.sender, "alice@example.com");
        assert_eq!(inbound.subject.as_deref(), Some("Quarterly report"));
        assert_eq!(inbound.received_at.to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }

    #[test]
    fn empty_records_is_rejected() {
        let event = TriggerEvent::from_json(r#"{"Records":[]}"#).unwrap();
        assert!(matches!(event.into_inbound(), Err(EventError::NoRecords)));
    }

    #[test]
    fn missing_records_key_is_rejected() {
        let event = TriggerEvent::from_json("{}").unwrap();
        assert!(matches!(event.into_inbound(), Err(EventError::NoRecords)));
    }

    #[test]
    fn blank_message_id_is_rejected() {
        let event = TriggerEvent::from_json(&event_json(" ", "alice@example.com")).unwrap();
        assert!(matches!(
            event.into_inbound(),
            Err(EventError::MissingField("messageId"))
        ));
    }

    #[test]
    fn blank_sender_is_rejected() {
        let event = TriggerEvent::from_json(&event_json("abc123", "")).unwrap();
        assert!(matches!(
            event.into_inbound(),
            Err(EventError::MissingField("source"))
        ));
    }

    #[test]
    fn missing_subject_is_none() {
        let json = r#"{"Records":[{"ses":{"mail":{
            "messageId":"abc123",
            "source":"alice@example.com",
            "timestamp":"2024-05-01T10:30:00Z"
        }}}]}"#;
        let inbound = TriggerEvent::from_json(json).unwrap().into_inbound().unwrap();
        assert!(inbound.subject.is_none());
    }

    #[test]
    fn only_first_record_is_used() {
        let json = r#"{"Records":[
            {"ses":{"mail":{"messageId":"first","source":"a@x.com","timestamp":"2024-05-01T10:30:00Z"}}},
            {"ses":{"mail":{"messageId":"second","source":"b@x.com","timestamp":"2024-05-01T10:31:00Z"}}}
        ]}"#;
        let inbound = TriggerEvent::from_json(json).unwrap().into_inbound().unwrap();
        assert_eq!(inbound.message_id, "first");
    }
}
