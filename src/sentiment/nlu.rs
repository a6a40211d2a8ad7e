//! NLU collaborator adapter — keyword-targeted emotion analysis.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::PipelineConfig;
use crate::error::NluError;
use crate::sentiment::EmotionVector;

/// Seam for the external emotion-analysis service.
#[async_trait]
pub trait EmotionAnalyzer: Send + Sync {
    /// Analyze `text` for emotions scoped to occurrences of `targets`.
    ///
    /// Returns one vector per keyword occurrence actually found; a
    /// keyword absent from the text yields no vector. One outbound call
    /// per invocation — no caching, no retry.
    async fn analyze(
        &self,
        text: &str,
        targets: &[&str],
    ) -> Result<Vec<EmotionVector>, NluError>;
}

/// Watson Natural Language Understanding client.
pub struct WatsonNlu {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    version: String,
}

impl WatsonNlu {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.nlu_url.trim_end_matches('/').to_string(),
            api_key: config.nlu_api_key.clone(),
            version: config.nlu_version.clone(),
        }
    }
}

// ── Response shape ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    emotion: Option<EmotionResult>,
}

#[derive(Debug, Deserialize)]
struct EmotionResult {
    #[serde(default)]
    targets: Vec<TargetEmotion>,
}

#[derive(Debug, Deserialize)]
struct TargetEmotion {
    emotion: EmotionVector,
}

#[async_trait]
impl EmotionAnalyzer for WatsonNlu {
    async fn analyze(
        &self,
        text: &str,
        targets: &[&str],
    ) -> Result<Vec<EmotionVector>, NluError> {
        let body = serde_json::json!({
            "text": text.to_lowercase(),
            "features": {
                "emotion": { "targets": targets }
            }
        });

        let response = self
            .client
            .post(format!("{}/v1/analyze", self.base_url))
            .query(&[("version", self.version.as_str())])
            .basic_auth("apikey", Some(self.api_key.expose_secret()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            // Watson answers 400 "targets not found" when none of the
            // keywords occur in the text; that is zero occurrences here,
            // not an upstream failure.
            if status.as_u16() == 400 && detail.contains("target") {
                return Ok(Vec::new());
            }
            return Err(NluError::Status {
                status: status.as_u16(),
                body: detail,
            });
        }

        let parsed: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| NluError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .emotion
            .map(|e| e.targets.into_iter().map(|t| t.emotion).collect())
            .unwrap_or_default())
    }
}
