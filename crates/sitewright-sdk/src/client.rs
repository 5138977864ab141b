//! HTTP client for the generation service.

use crate::error::{classify_failure, ErrorBody, SdkError};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use sitewright_domain::{ContentId, StoredDocument, StyleHints, WebsiteContent};
use sitewright_generator::{extract_hints, GenerationRequest};
use sitewright_llm::RetryPolicy;
use sitewright_validator::ContentValidator;
use tracing::{debug, warn};

/// A validated document returned by [`SiteClient::generate`]
#[derive(Debug, Clone)]
pub struct GeneratedSite {
    /// Id the service stored the document under, if it reported one
    pub id: Option<ContentId>,
    /// The generated document
    pub content: WebsiteContent,
    /// Hints sent along with the prompt
    pub hints: StyleHints,
}

#[derive(Debug, Deserialize)]
struct SuccessBody {
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    id: Option<String>,
}

/// Client for a Sitewright server
///
/// # Example
///
/// ```no_run
/// use sitewright_sdk::SiteClient;
///
/// # async fn example() -> Result<(), sitewright_sdk::SdkError> {
/// let client = SiteClient::new("http://localhost:3000");
/// let latest = client.latest().await?;
/// println!("{}", latest.content.title);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SiteClient {
    base_url: String,
    http: reqwest::Client,
    retry: RetryPolicy,
    validator: ContentValidator,
}

impl SiteClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            retry: RetryPolicy::default(),
            validator: ContentValidator::default_config(),
        }
    }

    /// Replace the retry policy used for generation requests
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the validator applied to received documents
    pub fn with_validator(mut self, validator: ContentValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate a website for `prompt`
    ///
    /// Style hints are extracted locally and sent with the prompt. Rate
    /// limits and network failures are retried per the client's policy.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedSite, SdkError> {
        let hints = extract_hints(prompt);
        let request = GenerationRequest::new(prompt).with_hints(hints.clone());

        let response = self.post_with_retry(&request).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let err = classify_failure(status, body);
            warn!(status = status.as_u16(), error = %err, "Generation failed");
            return Err(err);
        }

        let body: SuccessBody = serde_json::from_str(&text)?;
        let candidate = body.content.ok_or(SdkError::MissingContent)?;
        let content = self
            .validator
            .validate(&candidate)
            .map_err(SdkError::InvalidContent)?;
        let id = body.id.as_deref().and_then(|raw| ContentId::parse(raw).ok());

        debug!(?id, sections = content.sections.len(), "Received generated site");
        Ok(GeneratedSite { id, content, hints })
    }

    /// Fetch the document stored under `id`
    pub async fn fetch(&self, id: ContentId) -> Result<StoredDocument, SdkError> {
        self.get_document(&id.to_string()).await
    }

    /// Fetch the most recently stored document
    pub async fn latest(&self) -> Result<StoredDocument, SdkError> {
        self.get_document("latest").await
    }

    async fn get_document(&self, key: &str) -> Result<StoredDocument, SdkError> {
        let url = format!("{}/api/content/{}", self.base_url, key);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn post_with_retry(&self, request: &GenerationRequest) -> Result<Response, SdkError> {
        let url = format!("{}/api/generate", self.base_url);
        let attempts = self.retry.attempts();
        let mut attempt = 0;

        loop {
            let last = attempt + 1 >= attempts;
            match self.http.post(&url).json(request).send().await {
                Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS && !last => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(attempt, ?delay, "Rate limited, retrying");
                    tokio::time::sleep(delay).await;
                }
                Ok(response) => return Ok(response),
                Err(e) if is_transient(&e) && !last => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(attempt, ?delay, error = %e, "Request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
            attempt += 1;
        }
    }
}

fn is_transient(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout() || e.is_request()
}
