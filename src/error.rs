//! Error types for mailscore.

/// Top-level error type for the pipeline.
///
/// Every variant maps to one failure class of the message lifecycle.
/// Errors are terminal for the message being processed — nothing here
/// is retried by the pipeline itself.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Validation error: {0}")]
    Validation(#[from] EventError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("NLU error: {0}")]
    Nlu(#[from] NluError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Trigger-event validation errors.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Event contains no mail records")]
    NoRecords,

    #[error("Malformed event payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Missing or empty event field: {0}")]
    MissingField(&'static str),
}

/// MIME extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Malformed MIME structure: {0}")]
    Malformed(String),
}

/// Blob-store errors. `NotFound` is distinct so the orchestrator can
/// recognize a duplicate trigger whose raw email was already consumed.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Blob store {op} failed for {key}: {reason}")]
    Request {
        op: &'static str,
        key: String,
        reason: String,
    },
}

/// NLU collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum NluError {
    #[error("NLU request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("NLU returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid NLU response: {0}")]
    InvalidResponse(String),
}

/// Record-store errors.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Record write failed: {0}")]
    Write(String),
}

/// Result type alias for the pipeline.
pub type Result<T> = std::result::Result<T, PipelineError>;
