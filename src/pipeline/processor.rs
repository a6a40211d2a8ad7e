//! Pipeline orchestrator — drives one message from trigger event to
//! persisted record.
//!
//! Flow:
//! 1. Validate the trigger event, allow-list the sender
//! 2. Fetch + parse the raw email, relocate the attachment, delete the raw blob
//! 3. Score the body against the keyword vocabulary (skipped if no body)
//! 4. Persist the record
//!
//! Every failure is terminal for the message and surfaces as
//! `Outcome::Failed`; nothing is retried here and nothing propagates to
//! the caller.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::PipelineError;
use crate::event::{InboundEmail, TriggerEvent};
use crate::extract::extract_content;
use crate::pipeline::types::{EmailRecord, Outcome, Stage};
use crate::sentiment::{EmotionAnalyzer, SentimentScore, TARGET_KEYWORDS, aggregate};
use crate::store::traits::{BlobStore, RecordStore};

/// Orchestrator for the email sentiment pipeline.
///
/// Holds injected collaborator handles; one instance serves any number
/// of invocations, each processing exactly one message end-to-end with
/// no shared mutable state.
pub struct EmailPipeline {
    source: Arc<dyn BlobStore>,
    attachments: Arc<dyn BlobStore>,
    records: Arc<dyn RecordStore>,
    nlu: Arc<dyn EmotionAnalyzer>,
    allowed_senders: Vec<String>,
}

impl EmailPipeline {
    pub fn new(
        source: Arc<dyn BlobStore>,
        attachments: Arc<dyn BlobStore>,
        records: Arc<dyn RecordStore>,
        nlu: Arc<dyn EmotionAnalyzer>,
        allowed_senders: Vec<String>,
    ) -> Self {
        Self {
            source,
            attachments,
            records,
            nlu,
            allowed_senders,
        }
    }

    /// Handle one trigger event. Never returns an error: failures are
    /// logged with message and stage context and reported in the
    /// `Outcome`.
    pub async fn handle_event(&self, payload: &str) -> Outcome {
        let email = match TriggerEvent::from_json(payload).and_then(TriggerEvent::into_inbound) {
            Ok(email) => email,
            Err(e) => {
                error!(stage = Stage::Validate.label(), error = %e, "Event validation failed");
                return Outcome::Failed {
                    message_id: None,
                    stage: Stage::Validate,
                    error: e.into(),
                };
            }
        };

        info!(id = %email.message_id, sender = %email.sender, "Handling inbound email");

        let message_id = email.message_id.clone();
        match self.process(email).await {
            Ok(outcome) => outcome,
            Err((stage, error)) => {
                error!(
                    id = %message_id,
                    stage = stage.label(),
                    error = %error,
                    "Message processing failed"
                );
                Outcome::Failed {
                    message_id: Some(message_id),
                    stage,
                    error,
                }
            }
        }
    }

    /// Staged processing of a validated email.
    async fn process(&self, email: InboundEmail) -> Result<Outcome, (Stage, PipelineError)> {
        if !is_sender_allowed(&self.allowed_senders, &email.sender) {
            info!(
                id = %email.message_id,
                sender = %email.sender,
                "Sender not allow-listed, discarding"
            );
            self.source
                .delete(&email.message_id)
                .await
                .map_err(|e| (Stage::Cleanup, e.into()))?;
            return Ok(Outcome::Discarded {
                message_id: email.message_id,
            });
        }

        // Fetch + parse. A parse failure leaves the raw blob in place
        // for manual inspection; a NotFound here means a duplicate
        // trigger whose raw email was already consumed.
        let raw = self
            .source
            .get(&email.message_id)
            .await
            .map_err(|e| (Stage::Extract, e.into()))?;
        let content = extract_content(&raw).map_err(|e| (Stage::Extract, e.into()))?;
        debug!(
            id = %email.message_id,
            has_body = content.body.is_some(),
            has_attachment = content.attachment.is_some(),
            "Email extracted"
        );

        // Relocate the attachment, then delete the raw email — exactly
        // once, only after extraction succeeded. The filename goes into
        // the key verbatim (known gap: no sanitization).
        let attachment_key = match &content.attachment {
            Some(attachment) => {
                let key = format!("{}-{}", email.message_id, attachment.filename);
                self.attachments
                    .put(&key, &attachment.payload)
                    .await
                    .map_err(|e| (Stage::Extract, e.into()))?;
                info!(id = %email.message_id, key = %key, "Attachment relocated");
                Some(key)
            }
            None => None,
        };
        self.source
            .delete(&email.message_id)
            .await
            .map_err(|e| (Stage::Cleanup, e.into()))?;

        // Attachment-only mail gets the neutral score without an NLU call.
        let score = match content.body.as_deref() {
            Some(body) => {
                let vectors = self
                    .nlu
                    .analyze(body, TARGET_KEYWORDS)
                    .await
                    .map_err(|e| (Stage::Score, e.into()))?;
                aggregate(&vectors)
            }
            None => SentimentScore::NEUTRAL,
        };

        // A persist failure past this point leaves the attachment
        // relocated and the raw email deleted with no record — accepted
        // at-most-once gap, surfaced via Outcome::Failed.
        let record = EmailRecord {
            message_id: email.message_id,
            date: email.received_at,
            subject: email.subject,
            sender: email.sender,
            body: content.body,
            score: score.intensity(),
            attachment_key,
        };
        self.records
            .put_record(&record)
            .await
            .map_err(|e| (Stage::Persist, e.into()))?;

        info!(id = %record.message_id, score = record.score, "Record persisted");
        Ok(Outcome::Processed(record))
    }
}

/// Check if a sender address is on the allow-list.
///
/// - Empty list → deny all
/// - `*` in list → allow all
/// - `@domain.com` or `domain.com` → domain match
/// - `user@domain.com` → exact address match
pub fn is_sender_allowed(allowed: &[String], sender: &str) -> bool {
    if allowed.is_empty() {
        return false;
    }
    if allowed.iter().any(|a| a == "*") {
        return true;
    }
    let sender_lower = sender.to_lowercase();
    allowed.iter().any(|a| {
        if a.starts_with('@') {
            sender_lower.ends_with(&a.to_lowercase())
        } else if a.contains('@') {
            a.eq_ignore_ascii_case(sender)
        } else {
            sender_lower.ends_with(&format!("@{}", a.to_lowercase()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_allowlist_denies_all() {
        assert!(!is_sender_allowed(&[], "anyone@example.com"));
    }

    #[test]
    fn wildcard_allows_all() {
        assert!(is_sender_allowed(&list(&["*"]), "anyone@example.com"));
    }

    #[test]
    fn exact_address_match_is_case_insensitive() {
        let allowed = list(&["alice@example.com"]);
        assert!(is_sender_allowed(&allowed, "Alice@Example.COM"));
        assert!(!is_sender_allowed(&allowed, "bob@example.com"));
    }

    #[test]
    fn domain_entries_match_by_suffix() {
        assert!(is_sender_allowed(&list(&["@example.com"]), "x@example.com"));
        assert!(is_sender_allowed(&list(&["example.com"]), "x@example.com"));
        assert!(!is_sender_allowed(&list(&["example.com"]), "x@other.com"));
    }
}
