//! Chat-completions wire format and the HTTP transport
//!
//! A [`ChatTransport`] performs exactly one attempt; retries belong to
//! [`crate::ModelInvoker`].

use crate::classify::{classify_http_failure, classify_transport_failure, error_chain};
use crate::config::ModelConfig;
use crate::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system" or "user"
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// A system-role message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// A user-role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat-completions endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// System message followed by the user message
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling mass
    pub top_p: f64,
    /// Completion token cap
    pub max_tokens: u32,
    /// Model identifier
    pub model: String,
}

impl ChatRequest {
    /// Build a request from the configured sampling parameters
    pub fn new(config: &ModelConfig, system: &str, user: &str) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
            model: config.model.clone(),
        }
    }

    /// Text of the user message, if any
    pub fn user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|message| message.role == "user")
            .map(|message| message.content.as_str())
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extract `choices[0].message.content` from a success body
///
/// A `null` content is the empty string; a body without a first choice is
/// reported as a `Model` error carrying the body.
pub fn parse_completion(status: u16, body: &str) -> Result<String, LlmError> {
    let malformed = || LlmError::Model {
        status,
        body: body.to_string(),
    };

    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|_| malformed())?;
    let choice = response.choices.into_iter().next().ok_or_else(malformed)?;
    Ok(choice.message.content.unwrap_or_default())
}

/// A single attempt against the model
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one request and return the raw message content
    async fn send(&self, request: &ChatRequest) -> Result<String, LlmError>;

    /// False when the transport cannot run (e.g. no credential)
    fn is_configured(&self) -> bool {
        true
    }
}

/// reqwest-backed transport with bearer authentication
pub struct HttpTransport {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint
    ///
    /// No timeout is applied unless `request_timeout_secs` is set.
    pub fn new(config: &ModelConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: config.completions_url(),
            token: config
                .token
                .as_deref()
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string),
            client,
        })
    }

    /// The full URL requests are posted to
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| LlmError::Auth("No model credential configured".to_string()))?;

        debug!("POST {} (model {})", self.url, request.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| classify_transport_failure(&error_chain(&e), e.is_timeout()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_failure(&error_chain(&e), e.is_timeout()))?;

        if !(200..300).contains(&status) {
            return Err(classify_http_failure(status, &body));
        }

        parse_completion(status, &body)
    }

    fn is_configured(&self) -> bool {
        self.token.is_some()
    }
}
