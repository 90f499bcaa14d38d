//! Client for the generative health-analysis service
//!
//! The service is a free-text completion API. This module only moves a prompt
//! in and a reply out; interpreting the reply is the domain layer's job.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Default model used for report analysis
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default REST base for the Gemini API
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Errors raised while talking to the analysis service
#[derive(Debug, Error)]
pub enum AnalysisClientError {
    /// No API key was configured
    #[error("Analysis service is not configured")]
    NotConfigured,

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the service
    #[error("Analysis service returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message reported by the service, if any
        message: String,
    },

    /// The service answered without any text
    #[error("Analysis service returned an empty response")]
    EmptyResponse,
}

/// Text-completion client used by the analysis adapter
#[async_trait]
pub trait AnalysisClientTrait: Send + Sync {
    /// Send `prompt` and return the model's text reply
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisClientError>;

    /// Whether the client has the credentials it needs to make calls
    fn is_configured(&self) -> bool;
}

/// Connection settings for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` disables the client
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-1.5-flash`
    pub model: String,
    /// REST base URL without trailing slash
    pub api_base: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build a client from `config`
    pub fn new(config: GeminiConfig) -> Result<Self, AnalysisClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl AnalysisClientTrait for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisClientError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AnalysisClientError::NotConfigured)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!("Requesting analysis ({} prompt bytes)", prompt.len());

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(AnalysisClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        extract_text(body).ok_or(AnalysisClientError::EmptyResponse)
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
