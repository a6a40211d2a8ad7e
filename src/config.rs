//! Pipeline configuration, built from environment variables.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Watson NLU API version date.
const DEFAULT_NLU_VERSION: &str = "2022-04-07";

/// Configuration for one pipeline process, loaded once at startup.
///
/// Collaborator handles (S3, DynamoDB, NLU) are constructed from this in
/// `main` and injected into the orchestrator — no ambient singletons.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Senders whose mail is processed. Everything else is discarded.
    pub allowed_senders: Vec<String>,
    /// Bucket holding raw inbound emails, keyed by message id.
    pub source_bucket: String,
    /// Bucket receiving relocated attachments.
    pub attachment_bucket: String,
    /// Table receiving persisted email records.
    pub records_table: String,
    /// Base URL of the NLU service instance.
    pub nlu_url: String,
    /// NLU API key.
    pub nlu_api_key: SecretString,
    /// NLU API version date.
    pub nlu_version: String,
}

impl PipelineConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let allowed_senders: Vec<String> = require("MAILSCORE_ALLOWED_SENDERS")?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let nlu_version = std::env::var("MAILSCORE_NLU_VERSION")
            .unwrap_or_else(|_| DEFAULT_NLU_VERSION.to_string());

        Ok(Self {
            allowed_senders,
            source_bucket: require("MAILSCORE_SOURCE_BUCKET")?,
            attachment_bucket: require("MAILSCORE_ATTACHMENT_BUCKET")?,
            records_table: require("MAILSCORE_RECORDS_TABLE")?,
            nlu_url: require("MAILSCORE_NLU_URL")?,
            nlu_api_key: SecretString::from(require("MAILSCORE_NLU_API_KEY")?),
            nlu_version,
        })
    }
}

/// Read a required environment variable, rejecting empty values.
fn require(key: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}
