//! Sitewright Model Layer
//!
//! Invokes a remote chat-completions model and classifies its failures.
//!
//! # Architecture
//!
//! ```text
//! ModelProvider (system, user) -> raw text
//!   └── ModelInvoker: retry loop driven by a RetryPolicy
//!         └── ChatTransport: one attempt on the wire
//!               ├── HttpTransport (reqwest)
//!               └── MockTransport (scripted outcomes, for tests)
//! ```
//!
//! Failures are classified into [`LlmError`]. Rate limits, timeouts and
//! network failures are retried with exponential backoff; everything else
//! aborts on first occurrence.
//!
//! # Examples
//!
//! ```
//! use sitewright_llm::{MockProvider, ModelProvider};
//!
//! let provider = MockProvider::new(r#"{"title": "Hi"}"#);
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let text = rt.block_on(provider.complete("system", "user")).unwrap();
//! assert_eq!(text, r#"{"title": "Hi"}"#);
//! ```

#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod http;
pub mod invoker;
pub mod mock;
pub mod retry;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use config::ModelConfig;
pub use http::{ChatMessage, ChatRequest, ChatTransport, HttpTransport};
pub use invoker::ModelInvoker;
pub use mock::MockTransport;
pub use retry::RetryPolicy;

/// Errors that can occur while invoking the model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Credential rejected (HTTP 401/403 or an auth marker in the body)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// HTTP 429
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Account quota or permissions exhausted
    #[error("Quota exceeded: {0}")]
    Quota(String),

    /// Request or upstream timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection refused, DNS failure, or other transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success response
    #[error("Model error (HTTP {status}): {body}")]
    Model {
        /// HTTP status code
        status: u16,
        /// Response body as received
        body: String,
    },
}

impl LlmError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimit(_) | LlmError::Timeout(_) | LlmError::Network(_)
        )
    }

    /// Short machine-readable class name
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Auth(_) => "auth",
            LlmError::RateLimit(_) => "rate_limit",
            LlmError::Quota(_) => "quota",
            LlmError::Timeout(_) => "timeout",
            LlmError::Network(_) => "network",
            LlmError::Model { .. } => "model",
        }
    }
}

/// Anything that turns a system + user message pair into raw model text
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Run one completion (including any retries the provider performs)
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;

    /// False when the provider lacks the configuration it needs to run
    fn is_configured(&self) -> bool {
        true
    }

    /// Model identifier, for logs and health reporting
    fn model_name(&self) -> &str;
}

/// Mock provider for deterministic pipeline tests
///
/// Returns a fixed response (or a fixed error) without any network calls and
/// records what it was asked.
///
/// # Examples
///
/// ```
/// use sitewright_llm::{LlmError, MockProvider, ModelProvider};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
///
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(rt.block_on(provider.complete("s", "u")).unwrap(), "Fixed response");
/// assert_eq!(provider.last_user_message().as_deref(), Some("u"));
///
/// let failing = MockProvider::failing(LlmError::Quota("insufficient_quota".into()));
/// assert!(rt.block_on(failing.complete("s", "u")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    outcome: Result<String, LlmError>,
    configured: bool,
    call_count: Arc<Mutex<usize>>,
    last_user: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    /// Create a provider that always answers with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_outcome(Ok(response.into()))
    }

    /// Create a provider that always fails with `error`
    pub fn failing(error: LlmError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<String, LlmError>) -> Self {
        Self {
            outcome,
            configured: true,
            call_count: Arc::new(Mutex::new(0)),
            last_user: Arc::new(Mutex::new(None)),
        }
    }

    /// Mark the provider as missing its configuration
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Number of completions requested so far
    pub fn call_count(&self) -> usize {
        self.call_count.lock().map(|count| *count).unwrap_or(0)
    }

    /// The user message of the most recent completion
    pub fn last_user_message(&self) -> Option<String> {
        self.last_user.lock().ok().and_then(|last| last.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, LlmError> {
        if let Ok(mut count) = self.call_count.lock() {
            *count += 1;
        }
        if let Ok(mut last) = self.last_user.lock() {
            *last = Some(user.to_string());
        }
        self.outcome.clone()
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
