//! Client abstraction for the generative-language backend.
//!
//! The orchestrator talks to the backend through the [`GenerationClient`]
//! trait; the default adapter issues non-streaming HTTP requests to an Ollama
//! runtime. Every call carries a bounded timeout so a stalled backend cannot
//! pin a request forever, and each error knows whether a retry is worthwhile.

use crate::config::get_config;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors surfaced while calling the generation backend.
#[derive(Debug, Error)]
pub enum GenerationClientError {
    /// The backend could not be reached or the request timed out.
    #[error("Generation backend unreachable: {0}")]
    Unreachable(String),
    /// The backend answered with a non-success status.
    #[error("Generation backend returned {status}: {body}")]
    RequestFailed {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body captured for diagnostics.
        body: String,
    },
    /// The backend envelope could not be decoded.
    #[error("Malformed backend response: {0}")]
    InvalidResponse(String),
}

impl GenerationClientError {
    /// Whether the caller may reasonably retry the same request.
    ///
    /// Transport failures and 5xx responses are transient; 4xx responses and
    /// undecodable envelopes indicate a request or backend defect that a
    /// retry will not fix.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unreachable(_) => true,
            Self::RequestFailed { status, .. } => *status >= 500,
            Self::InvalidResponse(_) => false,
        }
    }
}

/// Request payload passed to the generation backend.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Fully qualified model identifier understood by the backend.
    pub model: String,
    /// Prompt assembled by the summarization pipeline.
    pub prompt: String,
}

/// Interface implemented by generation backends.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Produce the model's raw text reply for the supplied prompt.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationClientError>;
}

/// Build the generation client from configuration.
pub fn get_generation_client() -> Box<dyn GenerationClient + Send + Sync> {
    let config = get_config();
    let base_url = config
        .ollama_url
        .clone()
        .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
    Box::new(OllamaGenerationClient::new(
        base_url,
        Duration::from_secs(config.generation_timeout_secs),
    ))
}

struct OllamaGenerationClient {
    http: Client,
    base_url: String,
}

impl OllamaGenerationClient {
    fn new(base_url: String, timeout: Duration) -> Self {
        let http = Client::builder()
            .user_agent("veris/summarize")
            .timeout(timeout)
            .build()
            .expect("Failed to construct reqwest::Client for generation");
        Self { http, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl GenerationClient for OllamaGenerationClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationClientError> {
        let payload = json!({
            "model": request.model,
            "prompt": request.prompt,
            "stream": false,
            "options": {
                // Lower temperature keeps clause labels stable.
                "temperature": 0.2,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                let detail = if error.is_timeout() {
                    format!("request to {} timed out", self.base_url)
                } else {
                    format!("failed to reach {}: {error}", self.base_url)
                };
                GenerationClientError::Unreachable(detail)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationClientError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            GenerationClientError::InvalidResponse(format!(
                "failed to decode backend response: {error}"
            ))
        })?;

        if !body.done {
            return Err(GenerationClientError::InvalidResponse(
                "backend response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.response.trim().to_string())
    }
}
