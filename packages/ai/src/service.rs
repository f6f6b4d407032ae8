// ABOUTME: Gateway client for the Groq OpenAI-compatible chat-completions API
// ABOUTME: Single synchronous-call surface with JSON-mode output and image parts

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Empty AI response")]
    EmptyResponse,
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    max_completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// One typed part of a user message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<MessageContent>,
}

/// Providers return either a flat string or a list of typed parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ResponsePart>),
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl MessageContent {
    /// Concatenate list-structured content into a single string.
    fn into_text(self) -> String {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::Parts(parts) => parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect(),
        }
    }
}

/// Gateway client for JSON-mode chat completions.
pub struct GroqService {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GroqService {
    /// Create HTTP client with timeout configuration
    fn create_client() -> Client {
        Client::builder()
            .timeout(std::time::Duration::from_secs(600))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    /// Creates a new gateway client.
    ///
    /// The API key is fetched from the GROQ_API_KEY environment variable;
    /// when absent the client stays unconfigured and every call fails with
    /// `NoApiKey`. Model and base URL can be overridden with GROQ_MODEL and
    /// GROQ_BASE_URL.
    pub fn new() -> Self {
        let api_key = env::var("GROQ_API_KEY").ok();
        if api_key.is_none() {
            info!("GROQ_API_KEY not set - AI features disabled");
        }

        let model = env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom Groq model: {}", model);
        }

        let base_url = env::var("GROQ_BASE_URL").unwrap_or_else(|_| GROQ_API_URL.to_string());

        Self {
            client: Self::create_client(),
            api_key,
            model,
            base_url,
        }
    }

    /// Creates a new gateway client with a specific API key.
    pub fn with_api_key(api_key: String) -> Self {
        let model = env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self {
            client: Self::create_client(),
            api_key: Some(api_key),
            model,
            base_url: GROQ_API_URL.to_string(),
        }
    }

    /// Creates a client with no API key; every call fails with `NoApiKey`.
    pub fn disabled() -> Self {
        Self {
            client: Self::create_client(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: GROQ_API_URL.to_string(),
        }
    }

    /// Override the API base URL (wiremock tests, self-hosted proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get the model used by this client.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one user message and return the response text.
    ///
    /// Requests JSON-formatted output with the given token budget. The
    /// response content may be a flat string or a list of parts; parts are
    /// concatenated. No retries; the first failure is returned as-is.
    pub async fn chat_json(
        &self,
        parts: Vec<ContentPart>,
        max_completion_tokens: u32,
    ) -> AIServiceResult<String> {
        let api_key = self.api_key.as_ref().ok_or(AIServiceError::NoApiKey)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: parts,
            }],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            max_completion_tokens,
        };

        info!(
            "Making Groq API request: model={}, max_completion_tokens={}",
            request.model, request.max_completion_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Groq API error: {} - {}", status, error_text);
            return Err(AIServiceError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(MessageContent::into_text)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AIServiceError::EmptyResponse);
        }

        Ok(text)
    }
}

impl Default for GroqService {
    fn default() -> Self {
        Self::new()
    }
}
