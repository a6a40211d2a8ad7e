//! Shared types for the processing pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::PipelineError;

/// Record persisted for one successfully processed message.
///
/// Written exactly once; never updated. `score` is the intensity scalar
/// (max of the positive/negative buckets), a deliberate lossy collapse
/// for the persisted schema.
#[derive(Debug, Clone, Serialize)]
pub struct EmailRecord {
    pub message_id: String,
    pub date: DateTime<Utc>,
    pub subject: Option<String>,
    pub sender: String,
    /// Plain-text body. `None` for attachment-only mail.
    pub body: Option<String>,
    pub score: f64,
    /// Key of the relocated attachment, if one was present.
    pub attachment_key: Option<String>,
}

/// Pipeline stage, recorded as failure context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    Extract,
    Score,
    Persist,
    Cleanup,
}

impl Stage {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Extract => "extract",
            Self::Score => "score",
            Self::Persist => "persist",
            Self::Cleanup => "cleanup",
        }
    }
}

/// Terminal result of handling one trigger event.
///
/// The orchestrator boundary returns this instead of raising — the
/// trigger mechanism must never observe an error, or its own retry
/// policy would storm the pipeline.
#[derive(Debug)]
pub enum Outcome {
    /// Record persisted, raw email removed.
    Processed(EmailRecord),
    /// Sender not allow-listed: raw email removed, nothing persisted.
    /// A normal discard, not a failure.
    Discarded { message_id: String },
    /// Terminal failure for this message, already logged.
    Failed {
        /// Absent when validation failed before a message id was known.
        message_id: Option<String>,
        stage: Stage,
        error: PipelineError,
    },
}
