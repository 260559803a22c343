// SPDX-License-Identifier: MIT
//! Gateway to the external completion API.
//!
//! All "intelligence" lives behind this seam. The production implementation
//! posts an OpenAI-style chat-completions body to the configured base URL;
//! tests swap in a scripted gateway through the [`LlmGateway`] trait.
//!
//! The upstream call carries an explicit per-request timeout and a bounded
//! exponential-backoff retry. Exhaustion surfaces as a reported upstream
//! error; it is never fatal to the process.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::error::ApiError;

// ─── Models ──────────────────────────────────────────────────────────────────

/// The fixed set of remote models a request may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionModel {
    Llama33_70b,
    Llama31_405b,
    Mixtral8x7b,
    GeminiPro,
}

impl CompletionModel {
    /// Remote model identifier sent on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            CompletionModel::Llama33_70b => "llama-3.3-70b-versatile",
            CompletionModel::Llama31_405b => "llama-3.1-405b-reasoning",
            CompletionModel::Mixtral8x7b => "mixtral-8x7b-32768",
            CompletionModel::GeminiPro => "gemini-pro",
        }
    }

    /// Parse a client-supplied model id. Unknown ids are a client error,
    /// not a silent fallback. `None` selects the default model.
    pub fn parse(s: Option<&str>) -> Result<Self, ApiError> {
        match s {
            None | Some("") => Ok(Self::default()),
            Some("llama-3.3-70b-versatile") | Some("llama-3.3-70b") => {
                Ok(CompletionModel::Llama33_70b)
            }
            Some("llama-3.1-405b-reasoning") | Some("llama-3.1-405b") => {
                Ok(CompletionModel::Llama31_405b)
            }
            Some("mixtral-8x7b-32768") => Ok(CompletionModel::Mixtral8x7b),
            Some("gemini-pro") => Ok(CompletionModel::GeminiPro),
            Some(other) => Err(ApiError::InvalidRequest(format!(
                "unknown model '{other}'"
            ))),
        }
    }

    /// Catalog entries for `GET /api/models`.
    pub fn catalog() -> Vec<serde_json::Value> {
        [
            (CompletionModel::Llama33_70b, "Llama 3.3 70B", "Fast", "Excellent"),
            (CompletionModel::Llama31_405b, "Llama 3.1 405B", "Slower", "Best"),
            (CompletionModel::Mixtral8x7b, "Mixtral 8x7B", "Very Fast", "Good"),
            (CompletionModel::GeminiPro, "Gemini Pro", "Fast", "Excellent"),
        ]
        .into_iter()
        .map(|(model, name, speed, quality)| {
            json!({
                "id": model.id(),
                "name": name,
                "speed": speed,
                "quality": quality,
            })
        })
        .collect()
    }
}

impl Default for CompletionModel {
    fn default() -> Self {
        CompletionModel::Llama33_70b
    }
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// One completion request to the upstream API.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: CompletionModel,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: CompletionModel, prompt: String) -> Self {
        Self {
            model,
            prompt,
            temperature: 0.3,
            max_tokens: 2000,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

// ─── Gateway seam ────────────────────────────────────────────────────────────

/// The seam between request orchestration and the remote completion API.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `request` upstream and return the raw text completion.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ApiError>;

    /// Whether an API key is configured, for the health report.
    fn configured(&self) -> bool;
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

// ─── HTTP implementation ─────────────────────────────────────────────────────

/// Production gateway: OpenAI-compatible chat completions over HTTPS.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpGateway {
    pub fn new(config: &UpstreamConfig, api_key: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            max_retries: config.max_retries.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    async fn attempt(&self, key: &str, request: &CompletionRequest) -> Result<String, ApiError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": request.model.id(),
            "messages": [
                { "role": "system", "content": "You are a helpful coding assistant." },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "completion API returned {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("malformed completion response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ApiError::Upstream("completion response had no choices".to_string()))
    }
}

#[async_trait]
impl LlmGateway for HttpGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ApiError> {
        // Soft dependency: the missing key surfaces here, at request time.
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::Upstream("completion API key not configured".to_string()))?;

        let mut delay = self.retry_delay;
        let mut last_err = None;

        for attempt in 1..=self.max_retries {
            match self.attempt(key, &request).await {
                Ok(text) => {
                    if attempt > 1 {
                        debug!(attempt, "completion retry succeeded");
                    }
                    return Ok(text);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        warn!(
                            attempt,
                            max = self.max_retries,
                            delay_ms = delay.as_millis(),
                            err = %e,
                            "completion attempt failed — retrying"
                        );
                        tokio::time::sleep(delay).await;
                        delay = delay.saturating_mul(2);
                    }
                    last_err = Some(e);
                }
            }
        }

        warn!(max = self.max_retries, "all completion attempts exhausted");
        Err(last_err
            .unwrap_or_else(|| ApiError::Upstream("completion call never attempted".to_string())))
    }

    fn configured(&self) -> bool {
        self.api_key.is_some()
    }
}
