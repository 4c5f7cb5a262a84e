//! Outbound client for the Gemini `generateContent` endpoint
//!
//! One call per gateway request, no retries. The HTTP timeout comes from
//! `ProviderConfig::timeout_secs`.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProviderConfig;
use crate::provider::types::{GenerateContentRequest, GenerateContentResponse};

/// Failures reaching or talking to the provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key configured
    #[error("Missing {0} on the server")]
    MissingApiKey(String),

    /// Provider answered with a non-2xx status
    #[error("Upstream returned {status}")]
    Upstream { status: u16, body: String },

    /// Connection failure, timeout, or unreadable response
    #[error("{0}")]
    Transport(String),

    /// 2xx response whose body is not JSON
    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    /// Model name that is not a plain `[collection/]name` path
    #[error("Invalid model name '{0}'")]
    InvalidModel(String),

    /// The HTTP client or target URL could not be constructed
    #[error("Provider client error: {0}")]
    Client(String),
}

/// Anything that can answer a `generateContent` call
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError>;
}

/// `generateContent` over HTTPS
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: ProviderConfig,
}

impl GeminiClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Client(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// `{base}/{version}/{modelPath}:generateContent`, without the key
    ///
    /// The model becomes part of the path, so it is restricted to segments
    /// of `[A-Za-z0-9._-]` that are not `.` or `..`.
    pub fn endpoint_url(&self, model: &str) -> Result<Url, ProviderError> {
        let path = model_path(model);
        if !is_valid_model_path(&path) {
            return Err(ProviderError::InvalidModel(model.to_string()));
        }

        let raw = format!(
            "{}/{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            path
        );
        Url::parse(&raw).map_err(|e| ProviderError::Client(format!("Invalid provider URL '{raw}': {e}")))
    }
}

/// Bare model names get the `models/` prefix; qualified names pass through
pub fn model_path(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

fn is_valid_model_path(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();
    segments.len() == 2
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && *segment != "."
                && *segment != ".."
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        })
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey(self.config.api_key_env.clone()))?;

        let url = self.endpoint_url(model)?;
        debug!(model, url = %url, "Calling generateContent");

        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Transport(format!("Request timed out: {e}"))
                } else if e.is_connect() {
                    ProviderError::Transport(format!("Failed to connect to provider: {e}"))
                } else {
                    ProviderError::Transport(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(model, status = status.as_u16(), "Provider returned an error");
            // An unreadable error body still carries the upstream status
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(error = %e, "Failed to read provider error body");
                String::new()
            });
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("Failed to read response body: {e}")))?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}
