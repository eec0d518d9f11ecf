//! Gemini Provider Implementation
//!
//! Talks to the hosted generative-language API (`models/{model}:generateContent`).
//!
//! # Features
//!
//! - Async HTTP communication over `reqwest`
//! - Configurable endpoint, model and generation settings
//! - Status codes mapped onto [`LlmError`] so callers can tell rate limits apart
//! - Strict response schema: anything without a candidate text is rejected
//!
//! Retries are not done here; the simplification orchestrator owns retry policy.
//!
//! # Examples
//!
//! ```no_run
//! use lexplain_llm::{GeminiConfig, GeminiProvider};
//!
//! let config = GeminiConfig::from_env().expect("LEXPLAIN_API_KEY must be set");
//! let provider = GeminiProvider::new(config).unwrap();
//! ```

use crate::LlmError;
use lexplain_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default HTTP timeout (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "LEXPLAIN_API_KEY";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    /// Sampling temperature
    pub temperature: f32,

    /// Top-k sampling
    pub top_k: u32,

    /// Nucleus sampling
    pub top_p: f32,

    /// Output token cap
    pub max_output_tokens: u32,
}

impl GenerationSettings {
    /// Settings used for plain-English rewriting
    pub fn simplification() -> Self {
        Self {
            temperature: 0.3,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 4096,
        }
    }

    /// Settings used for structured analysis, tuned for consistency
    pub fn analysis() -> Self {
        Self {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.8,
            max_output_tokens: 4096,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::simplification()
    }
}

/// Connection and generation settings for [`GeminiProvider`]
///
/// The API key is never serialized; it is read from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL of the API
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Settings for `generate`
    pub generation: GenerationSettings,

    /// Settings for `generate_structured`
    pub structured: GenerationSettings,

    /// API key
    #[serde(skip)]
    pub api_key: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            generation: GenerationSettings::simplification(),
            structured: GenerationSettings::analysis(),
            api_key: String::new(),
        }
    }
}

impl GeminiConfig {
    /// Default configuration with the API key taken from `LEXPLAIN_API_KEY`
    pub fn from_env() -> Result<Self, LlmError> {
        Self::default().with_api_key_from_env()
    }

    /// Fill in the API key from `LEXPLAIN_API_KEY`
    pub fn with_api_key_from_env(mut self) -> Result<Self, LlmError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => {
                self.api_key = key.trim().to_string();
                Ok(self)
            }
            _ => Err(LlmError::Unauthorized(format!(
                "{} is not set",
                API_KEY_ENV
            ))),
        }
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        for settings in [&self.generation, &self.structured] {
            if !(0.0..=2.0).contains(&settings.temperature) {
                return Err("temperature must be between 0.0 and 2.0".to_string());
            }
            if !(0.0..=1.0).contains(&settings.top_p) {
                return Err("top_p must be between 0.0 and 1.0".to_string());
            }
            if settings.max_output_tokens == 0 {
                return Err("max_output_tokens must be greater than 0".to_string());
            }
        }
        Ok(())
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Generative-language API provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfigBody,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigBody {
    #[serde(flatten)]
    settings: GenerationSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

fn build_request(
    prompt: &str,
    settings: GenerationSettings,
    json_output: bool,
) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: GenerationConfigBody {
            settings,
            response_mime_type: json_output.then_some("application/json"),
        },
        safety_settings: SAFETY_CATEGORIES
            .iter()
            .map(|&category| SafetySetting {
                category,
                threshold: SAFETY_THRESHOLD,
            })
            .collect(),
    }
}

/// Extract the first candidate text from a response body
fn parse_response(body: &str) -> Result<String, LlmError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| {
            LlmError::InvalidResponse("Response contained no candidate text".to_string())
        })
}

/// Map a non-success HTTP status onto an error
fn status_error(status: reqwest::StatusCode, body: &str, model: &str) -> LlmError {
    use reqwest::StatusCode;

    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Unauthorized(format!("HTTP {}", status))
        }
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        StatusCode::BAD_REQUEST => LlmError::InvalidRequest(body.to_string()),
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

impl GeminiProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when no API key is configured and `Other` when the
    /// configuration is invalid or the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Other)?;
        if config.api_key.is_empty() {
            return Err(LlmError::Unauthorized(format!("{} is not set", API_KEY_ENV)));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Model in use
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Endpoint URL without the key
    pub fn endpoint_url(&self) -> String {
        self.config.url()
    }

    /// Generate text using the API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is rate limiting (`RateLimitExceeded`)
    /// - The key is rejected (`Unauthorized`)
    /// - The model is unknown (`ModelNotAvailable`)
    /// - The request times out (`Timeout`)
    /// - The response has no candidate text (`InvalidResponse`)
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.send(prompt, self.config.generation, false).await
    }

    /// Generate JSON output
    pub async fn generate_json(&self, prompt: &str) -> Result<String, LlmError> {
        self.send(prompt, self.config.structured, true).await
    }

    async fn send(
        &self,
        prompt: &str,
        settings: GenerationSettings,
        json_output: bool,
    ) -> Result<String, LlmError> {
        let body = build_request(prompt, settings, json_output);
        debug!(model = %self.config.model, prompt_len = prompt.len(), "Sending generation request");

        let response = self
            .client
            .post(self.config.url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout_secs)
                } else {
                    LlmError::Communication(format!("Request failed: {}", e.without_url()))
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            LlmError::Communication(format!("Failed to read response: {}", e.without_url()))
        })?;

        if !status.is_success() {
            return Err(status_error(status, &text, &self.config.model));
        }

        parse_response(&text)
    }

    fn block_on<F>(&self, future: F) -> Result<String, LlmError>
    where
        F: std::future::Future<Output = Result<String, LlmError>>,
    {
        tokio::runtime::Runtime::new()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?
            .block_on(future)
    }
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.block_on(GeminiProvider::generate(self, prompt))
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        let prompt = format!("{}\n\nRespond with JSON matching this schema:\n{}", prompt, schema);
        self.block_on(self.generate_json(&prompt))
    }
}
